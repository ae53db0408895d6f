/// ドメイン層のエラー型
/// ビジネスルール違反を表現する
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 無効な日付（例: 2月30日、2025年より前の年）
    InvalidDate(String),
    /// チケット在庫不足（残数を超える枚数、または0枚の予約）
    InsufficientInventory,
    /// 無効な枚数（例: 0枚の予約レコード）
    InvalidQuantity,
    /// ティアが見つからない
    TierNotFound(String),
    /// 無効な値
    InvalidValue(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidDate(msg) => write!(f, "Invalid date: {}", msg),
            DomainError::InsufficientInventory => write!(f, "Insufficient ticket inventory"),
            DomainError::InvalidQuantity => write!(f, "Invalid ticket quantity"),
            DomainError::TierNotFound(name) => write!(f, "Ticket tier not found: {}", name),
            DomainError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
