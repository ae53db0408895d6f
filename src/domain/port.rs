// 出力ポート
// ドメイン層が外部に依存する機能をトレイトとして定義
// アダプター層でこれらのトレイトを実装する

use crate::domain::event::DomainEvent;
use crate::domain::model::{Booking, Event, User};
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// ロガートレイト
/// ログ出力を抽象化するポート
pub trait Logger: Send + Sync {
    /// デバッグレベルのログを出力
    fn debug(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// 情報レベルのログを出力
    fn info(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// 警告レベルのログを出力
    fn warn(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// エラーレベルのログを出力
    fn error(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );
}

/// リポジトリエラー型
/// レコードストア操作で発生するエラーを表現する
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryError {
    /// ストアからの読み込みに失敗
    LoadFailed(String),
    /// ストアへの書き込みに失敗
    SaveFailed(String),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::LoadFailed(msg) => write!(f, "Load failed: {}", msg),
            RepositoryError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// イベントコレクションのレコードストア
/// コレクション全体の読み込みと全件上書き保存のみを提供する
///
/// 契約:
/// - ストアが存在しない・空の場合は空のリストを返す
/// - 壊れた行は黙ってスキップし、読み込み全体を失敗させない
/// - 保存は常に全件上書きで、部分書き込みはない
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// すべてのイベントを読み込む
    ///
    /// # Returns
    /// * `Ok(Vec<Event>)` - 読み込んだイベントのリスト
    /// * `Err(RepositoryError)` - 読み込み失敗
    async fn load_all(&self) -> Result<Vec<Event>, RepositoryError>;

    /// すべてのイベントを上書き保存する
    ///
    /// # Returns
    /// * `Ok(())` - 保存成功
    /// * `Err(RepositoryError)` - 保存失敗
    async fn save_all(&self, events: &[Event]) -> Result<(), RepositoryError>;
}

/// ユーザーコレクションのレコードストア
/// 契約はEventRepositoryと同じ
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// すべてのユーザーを読み込む
    async fn load_all(&self) -> Result<Vec<User>, RepositoryError>;

    /// すべてのユーザーを上書き保存する
    async fn save_all(&self, users: &[User]) -> Result<(), RepositoryError>;
}

/// 予約コレクションのレコードストア
/// 契約はEventRepositoryと同じ
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// すべての予約を読み込む
    async fn load_all(&self) -> Result<Vec<Booking>, RepositoryError>;

    /// すべての予約を上書き保存する
    async fn save_all(&self, bookings: &[Booking]) -> Result<(), RepositoryError>;
}

/// イベントバスエラー
#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    #[error("Event publishing failed: {0}")]
    PublishingFailed(String),
}

/// イベントバストレイト
/// イベントの発行と配信を管理するポート
#[async_trait]
pub trait EventBus: Send + Sync {
    /// イベントを発行し、登録されたハンドラーに配信
    async fn publish(&self, event: DomainEvent) -> Result<(), EventBusError>;
}
