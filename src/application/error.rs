use crate::domain::error::DomainError;
use crate::domain::model::{BookingId, EventId, UserId};
use crate::domain::port::RepositoryError;

/// アプリケーション層のエラー型
/// ドメインエラー、リポジトリエラー、参照先不明のエラーをラップする
#[derive(Debug)]
pub enum ApplicationError {
    /// ドメインエラー（ビジネスルール違反）
    Domain(DomainError),
    /// リポジトリエラー（永続化の失敗）
    Repository(RepositoryError),
    /// イベントバス発行エラー
    EventPublishingFailed(String),
    /// ユーザーが見つからない
    UserNotFound(UserId),
    /// イベントが見つからない
    EventNotFound(EventId),
    /// ティアが見つからない
    TierNotFound(String),
    /// 予約が見つからない（キャンセル済みの予約もここに含む）
    BookingNotFound(BookingId),
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationError::Domain(err) => write!(f, "Domain error: {}", err),
            ApplicationError::Repository(err) => write!(f, "Repository error: {}", err),
            ApplicationError::EventPublishingFailed(msg) => {
                write!(f, "Event publishing failed: {}", msg)
            }
            ApplicationError::UserNotFound(id) => write!(f, "User not found: {}", id),
            ApplicationError::EventNotFound(id) => write!(f, "Event not found: {}", id),
            ApplicationError::TierNotFound(name) => write!(f, "Ticket tier not found: {}", name),
            ApplicationError::BookingNotFound(id) => write!(f, "Booking not found: {}", id),
        }
    }
}

impl std::error::Error for ApplicationError {}

// From実装でエラー変換を簡潔に
impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        ApplicationError::Domain(err)
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        ApplicationError::Repository(err)
    }
}
