use std::sync::Arc;

use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::service::reporting::{self, BookingTotals};
use crate::domain::event::{
    BookingCancelled, BookingConfirmed, DomainEvent, EventRegistered, UserRegistered,
};
use crate::domain::model::{
    Booking, BookingId, Event, EventDate, EventId, Money, User, UserId,
};
use crate::domain::port::{
    BookingRepository, EventBus, EventRepository, Logger, UserRepository,
};
use crate::domain::service::{next_id, IdAllocator};

/// 予約成功時の確認情報
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    /// 払い出された予約ID
    pub booking_id: BookingId,
    /// 枚数
    pub tickets: u32,
    /// 予約時のティア単価
    pub unit_price: Money,
    /// 合計金額
    pub total_price: Money,
}

/// キャンセル成功時のサマリー
#[derive(Debug, Clone, PartialEq)]
pub struct CancellationSummary {
    /// キャンセルされた予約ID
    pub booking_id: BookingId,
    /// 在庫に戻された枚数
    pub tickets_released: u32,
}

/// 予約エンジン
/// セッション中の全状態（イベント・ユーザー・予約の3コレクションと
/// 予約ID採番カウンター）を排他的に所有する単一の書き込み主体。
/// ティア在庫と予約ステータスを変更するのはこのエンジンのみ。
pub struct BookingEngine {
    events: Vec<Event>,
    users: Vec<User>,
    bookings: Vec<Booking>,
    booking_ids: IdAllocator,
    event_repository: Arc<dyn EventRepository>,
    user_repository: Arc<dyn UserRepository>,
    booking_repository: Arc<dyn BookingRepository>,
    event_bus: Arc<dyn EventBus>,
    logger: Arc<dyn Logger>,
}

impl BookingEngine {
    /// 3つのレコードストアから状態を読み込んでエンジンを構築する
    /// 予約IDカウンターはここで一度だけシードされる
    pub async fn load(
        event_repository: Arc<dyn EventRepository>,
        user_repository: Arc<dyn UserRepository>,
        booking_repository: Arc<dyn BookingRepository>,
        event_bus: Arc<dyn EventBus>,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, ApplicationError> {
        let events = event_repository.load_all().await?;
        let users = user_repository.load_all().await?;
        let bookings = booking_repository.load_all().await?;
        let booking_ids = IdAllocator::seeded_from(bookings.iter().map(|b| b.id().value()));

        Ok(Self {
            events,
            users,
            bookings,
            booking_ids,
            event_repository,
            user_repository,
            booking_repository,
            event_bus,
            logger,
        })
    }

    /// 新しいイベントを登録する
    /// ティアは1つ以上必要（既定の"Standard"ティアの合成は呼び出し側の責務）
    ///
    /// # Returns
    /// * `Ok(EventId)` - 採番されたイベントID
    /// * `Err(ApplicationError)` - 日付・ティアの検証失敗
    pub async fn register_event(
        &mut self,
        name: String,
        location: String,
        date: &str,
        tiers: Vec<(String, Money, u32)>,
    ) -> Result<EventId, ApplicationError> {
        if tiers.is_empty() {
            return Err(ApplicationError::Domain(
                crate::domain::error::DomainError::InvalidValue(
                    "an event requires at least one ticket tier".to_string(),
                ),
            ));
        }

        let date = EventDate::parse(date)?;
        let id = EventId::new(next_id(self.events.iter().map(|e| e.id().value())));
        let mut event = Event::new(id, name, location, date)?;
        for (tier_name, unit_price, quantity) in tiers {
            event.add_tier(tier_name, unit_price, quantity)?;
        }

        let event_name = event.name().to_string();
        self.events.push(event);
        self.persist_events().await;

        let correlation_id = Uuid::new_v4();
        let registered = EventRegistered::with_correlation_id(id, event_name, correlation_id);
        self.event_bus
            .publish(DomainEvent::EventRegistered(registered))
            .await
            .map_err(|e| ApplicationError::EventPublishingFailed(e.to_string()))?;

        Ok(id)
    }

    /// 新しいユーザーを登録する
    ///
    /// # Returns
    /// * `Ok(User)` - 採番済みIDを持つ登録されたユーザー
    pub async fn register_user(&mut self, name: String) -> Result<User, ApplicationError> {
        let id = UserId::new(next_id(self.users.iter().map(|u| u.id().value())));
        let user = User::new(id, name);
        self.users.push(user.clone());
        self.persist_users().await;

        let correlation_id = Uuid::new_v4();
        let registered =
            UserRegistered::with_correlation_id(id, user.name().to_string(), correlation_id);
        self.event_bus
            .publish(DomainEvent::UserRegistered(registered))
            .await
            .map_err(|e| ApplicationError::EventPublishingFailed(e.to_string()))?;

        Ok(user)
    }

    /// チケットを予約する
    ///
    /// 検証順序:
    /// 1. ユーザーの存在
    /// 2. イベントの存在
    /// 3. ティアの存在
    /// 4. 在庫（0枚の要求もここで拒否）
    ///
    /// 成功時は在庫を減らし、予約IDを採番して確定済み予約を追加し、
    /// イベント・予約の両コレクションを永続化する。
    /// 永続化の失敗は診断として報告されるが、メモリ上の変更は巻き戻さない。
    pub async fn book_tickets(
        &mut self,
        user_id: UserId,
        event_id: EventId,
        tier_name: &str,
        quantity: u32,
    ) -> Result<BookingConfirmation, ApplicationError> {
        if !self.users.iter().any(|u| u.id() == user_id) {
            return Err(ApplicationError::UserNotFound(user_id));
        }

        let event = self
            .events
            .iter_mut()
            .find(|e| e.id() == event_id)
            .ok_or(ApplicationError::EventNotFound(event_id))?;

        let unit_price = event
            .tier(tier_name)
            .map(|tier| tier.unit_price())
            .ok_or_else(|| ApplicationError::TierNotFound(tier_name.to_string()))?;

        // 在庫の減算は永続化より先に行う
        event.reserve_tickets(tier_name, quantity)?;

        let total_price = unit_price.multiply(quantity);
        let booking_id = BookingId::new(self.booking_ids.allocate());
        let booking = Booking::new(
            booking_id,
            user_id,
            event_id,
            tier_name.to_string(),
            quantity,
            total_price,
        )?;
        self.bookings.push(booking);

        self.persist_events().await;
        self.persist_bookings().await;

        let correlation_id = Uuid::new_v4();
        let confirmed = BookingConfirmed::with_correlation_id(
            booking_id,
            user_id,
            event_id,
            tier_name.to_string(),
            quantity,
            total_price,
            correlation_id,
        );
        self.event_bus
            .publish(DomainEvent::BookingConfirmed(confirmed))
            .await
            .map_err(|e| ApplicationError::EventPublishingFailed(e.to_string()))?;

        Ok(BookingConfirmation {
            booking_id,
            tickets: quantity,
            unit_price,
            total_price,
        })
    }

    /// 予約をキャンセルする
    ///
    /// 存在しないIDと既にキャンセル済みのIDは区別せず、
    /// どちらも `BookingNotFound` として扱う。
    /// 成功時は予約時のティア名へ在庫を戻す（イベントが残っていて
    /// かつそのティアがまだ存在する場合のみ）。
    pub async fn cancel_booking(
        &mut self,
        booking_id: BookingId,
    ) -> Result<CancellationSummary, ApplicationError> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.id() == booking_id && b.is_confirmed())
            .ok_or(ApplicationError::BookingNotFound(booking_id))?;

        let event_id = booking.event_id();
        let tier_name = booking.tier_name().to_string();
        let tickets = booking.tickets();
        booking.cancel();

        if let Some(event) = self.events.iter_mut().find(|e| e.id() == event_id) {
            event.release_tickets(&tier_name, tickets);
        }

        self.persist_events().await;
        self.persist_bookings().await;

        let correlation_id = Uuid::new_v4();
        let cancelled = BookingCancelled::with_correlation_id(
            booking_id,
            event_id,
            tier_name,
            tickets,
            correlation_id,
        );
        self.event_bus
            .publish(DomainEvent::BookingCancelled(cancelled))
            .await
            .map_err(|e| ApplicationError::EventPublishingFailed(e.to_string()))?;

        Ok(CancellationSummary {
            booking_id,
            tickets_released: tickets,
        })
    }

    /// すべてのイベントを取得
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// 予約可能な（残数が1枚以上ある）イベントを取得
    pub fn bookable_events(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.total_available() > 0)
            .collect()
    }

    /// IDでイベントを取得
    pub fn event(&self, event_id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id() == event_id)
    }

    /// すべてのユーザーを取得
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// IDでユーザーを取得
    pub fn user(&self, user_id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id() == user_id)
    }

    /// すべての予約を取得
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// 指定ユーザーの予約をステータスを問わず取得
    pub fn bookings_for_user(&self, user_id: UserId) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| b.user_id() == user_id)
            .collect()
    }

    /// 次に採番されるイベントIDを覗き見る（登録前の画面表示用）
    pub fn next_event_id(&self) -> EventId {
        EventId::new(next_id(self.events.iter().map(|e| e.id().value())))
    }

    /// 次に採番されるユーザーIDを覗き見る（登録前の画面表示用）
    pub fn next_user_id(&self) -> UserId {
        UserId::new(next_id(self.users.iter().map(|u| u.id().value())))
    }

    /// システム全体の予約集計
    /// 枚数と売上は確定済み予約のみを合算する
    pub fn system_totals(&self) -> BookingTotals {
        reporting::booking_totals(self.bookings.iter())
    }

    /// 指定ユーザーの予約集計
    pub fn user_totals(&self, user_id: UserId) -> BookingTotals {
        reporting::booking_totals(self.bookings.iter().filter(|b| b.user_id() == user_id))
    }

    /// 3コレクションすべてを無条件に永続化する（終了処理）
    pub async fn persist_all(&self) {
        self.persist_users().await;
        self.persist_events().await;
        self.persist_bookings().await;
    }

    /// イベントコレクションを保存する
    /// 失敗は診断としてログに残し、呼び出し元の操作は中断しない
    async fn persist_events(&self) {
        if let Err(err) = self.event_repository.save_all(&self.events).await {
            self.logger.error(
                "BookingEngine",
                &format!("Failed to save events: {}", err),
                None,
                None,
            );
        }
    }

    /// ユーザーコレクションを保存する
    async fn persist_users(&self) {
        if let Err(err) = self.user_repository.save_all(&self.users).await {
            self.logger.error(
                "BookingEngine",
                &format!("Failed to save users: {}", err),
                None,
                None,
            );
        }
    }

    /// 予約コレクションを保存する
    async fn persist_bookings(&self) {
        if let Err(err) = self.booking_repository.save_all(&self.bookings).await {
            self.logger.error(
                "BookingEngine",
                &format!("Failed to save bookings: {}", err),
                None,
                None,
            );
        }
    }
}
