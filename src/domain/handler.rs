use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::event::{BookingCancelled, BookingConfirmed, EventRegistered, UserRegistered};
use crate::domain::event_bus::{EventHandler, HandlerError};
use crate::domain::port::Logger;

/// 通知ハンドラー
/// 各種ドメインイベントを受信して利用者向けの通知を送信する
/// 現状の実装ではログ出力で通知を代用する
#[derive(Clone)]
pub struct NotificationHandler {
    logger: Arc<dyn Logger>,
}

impl NotificationHandler {
    /// 新しい通知ハンドラーを作成
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    /// 通知メッセージを送信
    fn send_notification(&self, message: &str, correlation_id: Uuid, event_type: &str) {
        let mut context = HashMap::new();
        context.insert("event_type".to_string(), event_type.to_string());
        context.insert("recipient".to_string(), "customer".to_string());

        self.logger.info(
            "NotificationHandler",
            message,
            Some(correlation_id),
            Some(context),
        );
    }
}

#[async_trait]
impl EventHandler<BookingConfirmed> for NotificationHandler {
    async fn handle(&self, event: BookingConfirmed) -> Result<(), HandlerError> {
        let message = format!(
            "Booking confirmed. Booking ID: {}, tickets: {}, total: ${}",
            event.booking_id, event.tickets, event.total_price
        );
        self.send_notification(&message, event.metadata.correlation_id, "BookingConfirmed");
        Ok(())
    }
}

#[async_trait]
impl EventHandler<BookingCancelled> for NotificationHandler {
    async fn handle(&self, event: BookingCancelled) -> Result<(), HandlerError> {
        let message = format!(
            "Booking cancelled. Booking ID: {}, tickets released: {}",
            event.booking_id, event.tickets
        );
        self.send_notification(&message, event.metadata.correlation_id, "BookingCancelled");
        Ok(())
    }
}

#[async_trait]
impl EventHandler<EventRegistered> for NotificationHandler {
    async fn handle(&self, event: EventRegistered) -> Result<(), HandlerError> {
        let message = format!(
            "Event registered. Event ID: {}, name: {}",
            event.event_id, event.name
        );
        self.send_notification(&message, event.metadata.correlation_id, "EventRegistered");
        Ok(())
    }
}

#[async_trait]
impl EventHandler<UserRegistered> for NotificationHandler {
    async fn handle(&self, event: UserRegistered) -> Result<(), HandlerError> {
        let message = format!(
            "User registered. User ID: {}, name: {}",
            event.user_id, event.name
        );
        self.send_notification(&message, event.metadata.correlation_id, "UserRegistered");
        Ok(())
    }
}
