use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::model::{BookingId, EventId, Money, UserId};

/// 全ドメインイベント共通のメタデータ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    /// イベントの一意識別子
    pub event_id: Uuid,
    /// 一連の処理を関連付ける相関ID
    pub correlation_id: Uuid,
    /// イベント発生日時
    pub occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    /// 新しいメタデータを作成（相関IDも新規発行）
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            correlation_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }

    /// 既存の相関IDを引き継いでメタデータを作成
    pub fn with_correlation_id(correlation_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            correlation_id,
            occurred_at: Utc::now(),
        }
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// ドメインイベント列挙型
/// ビジネス上の重要なイベントを表現する
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainEvent {
    /// 予約が確定された
    BookingConfirmed(BookingConfirmed),
    /// 予約がキャンセルされた
    BookingCancelled(BookingCancelled),
    /// イベントが登録された
    EventRegistered(EventRegistered),
    /// ユーザーが登録された
    UserRegistered(UserRegistered),
}

impl DomainEvent {
    /// メタデータを取得
    pub fn metadata(&self) -> &EventMetadata {
        match self {
            DomainEvent::BookingConfirmed(e) => &e.metadata,
            DomainEvent::BookingCancelled(e) => &e.metadata,
            DomainEvent::EventRegistered(e) => &e.metadata,
            DomainEvent::UserRegistered(e) => &e.metadata,
        }
    }

    /// イベント種別名を取得
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::BookingConfirmed(_) => "BookingConfirmed",
            DomainEvent::BookingCancelled(_) => "BookingCancelled",
            DomainEvent::EventRegistered(_) => "EventRegistered",
            DomainEvent::UserRegistered(_) => "UserRegistered",
        }
    }
}

/// 予約確定イベント
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmed {
    /// 予約ID
    pub booking_id: BookingId,
    /// ユーザーID
    pub user_id: UserId,
    /// イベントID
    pub event_id: EventId,
    /// 予約したティア名
    pub tier_name: String,
    /// 枚数
    pub tickets: u32,
    /// 合計金額
    pub total_price: Money,
    /// メタデータ
    pub metadata: EventMetadata,
}

impl BookingConfirmed {
    /// 相関IDを引き継いで予約確定イベントを作成
    pub fn with_correlation_id(
        booking_id: BookingId,
        user_id: UserId,
        event_id: EventId,
        tier_name: String,
        tickets: u32,
        total_price: Money,
        correlation_id: Uuid,
    ) -> Self {
        Self {
            booking_id,
            user_id,
            event_id,
            tier_name,
            tickets,
            total_price,
            metadata: EventMetadata::with_correlation_id(correlation_id),
        }
    }
}

/// 予約キャンセルイベント
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCancelled {
    /// 予約ID
    pub booking_id: BookingId,
    /// イベントID
    pub event_id: EventId,
    /// 在庫を戻したティア名
    pub tier_name: String,
    /// 解放された枚数
    pub tickets: u32,
    /// メタデータ
    pub metadata: EventMetadata,
}

impl BookingCancelled {
    /// 相関IDを引き継いで予約キャンセルイベントを作成
    pub fn with_correlation_id(
        booking_id: BookingId,
        event_id: EventId,
        tier_name: String,
        tickets: u32,
        correlation_id: Uuid,
    ) -> Self {
        Self {
            booking_id,
            event_id,
            tier_name,
            tickets,
            metadata: EventMetadata::with_correlation_id(correlation_id),
        }
    }
}

/// イベント登録イベント
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRegistered {
    /// イベントID
    pub event_id: EventId,
    /// イベント名
    pub name: String,
    /// メタデータ
    pub metadata: EventMetadata,
}

impl EventRegistered {
    /// 相関IDを引き継いでイベント登録イベントを作成
    pub fn with_correlation_id(event_id: EventId, name: String, correlation_id: Uuid) -> Self {
        Self {
            event_id,
            name,
            metadata: EventMetadata::with_correlation_id(correlation_id),
        }
    }
}

/// ユーザー登録イベント
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistered {
    /// ユーザーID
    pub user_id: UserId,
    /// 表示名
    pub name: String,
    /// メタデータ
    pub metadata: EventMetadata,
}

impl UserRegistered {
    /// 相関IDを引き継いでユーザー登録イベントを作成
    pub fn with_correlation_id(user_id: UserId, name: String, correlation_id: Uuid) -> Self {
        Self {
            user_id,
            name,
            metadata: EventMetadata::with_correlation_id(correlation_id),
        }
    }
}
