use crate::domain::error::DomainError;
use crate::domain::model::{BookingId, BookingStatus, EventId, Money, UserId};

/// 予約集約
/// ライフサイクルは Confirmed -> Cancelled の一方向のみ
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    id: BookingId,
    user_id: UserId,
    event_id: EventId,
    tier_name: String,
    tickets: u32,
    total_price: Money,
    status: BookingStatus,
}

impl Booking {
    /// 新しい予約をConfirmed状態で作成
    /// 枚数は1以上である必要がある
    pub fn new(
        id: BookingId,
        user_id: UserId,
        event_id: EventId,
        tier_name: String,
        tickets: u32,
        total_price: Money,
    ) -> Result<Self, DomainError> {
        if tickets == 0 {
            return Err(DomainError::InvalidQuantity);
        }
        Ok(Self {
            id,
            user_id,
            event_id,
            tier_name,
            tickets,
            total_price,
            status: BookingStatus::Confirmed,
        })
    }

    /// ストアから読み込んだデータで予約を再構築
    pub fn reconstruct(
        id: BookingId,
        user_id: UserId,
        event_id: EventId,
        tier_name: String,
        tickets: u32,
        total_price: Money,
        status: BookingStatus,
    ) -> Result<Self, DomainError> {
        if tickets == 0 {
            return Err(DomainError::InvalidQuantity);
        }
        Ok(Self {
            id,
            user_id,
            event_id,
            tier_name,
            tickets,
            total_price,
            status,
        })
    }

    /// 予約IDを取得
    pub fn id(&self) -> BookingId {
        self.id
    }

    /// ユーザーIDを取得
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// イベントIDを取得
    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    /// 予約時のティア名を取得
    pub fn tier_name(&self) -> &str {
        &self.tier_name
    }

    /// 枚数を取得
    pub fn tickets(&self) -> u32 {
        self.tickets
    }

    /// 合計金額（予約時の単価 × 枚数）を取得
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// ステータスを取得
    pub fn status(&self) -> BookingStatus {
        self.status
    }

    /// 確定済みかどうか
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// 予約をキャンセルする
    /// 冪等: 既にCancelledの場合は何もしない
    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
    }
}
