use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::event::DomainEvent;
use crate::domain::event_bus::{
    BookingCancelledHandlerWrapper, BookingConfirmedHandlerWrapper, DynEventHandler, EventHandler,
    EventRegisteredHandlerWrapper, UserRegisteredHandlerWrapper,
};
use crate::domain::port::{EventBus, EventBusError, Logger};
use crate::domain::serialization::EventSerializer;

/// インメモリイベントバス実装
/// 登録されたハンドラーへ発行順にイベントを逐次配信する。
/// ハンドラーの失敗はログに残すだけで、発行元の操作も
/// 他のハンドラーへの配信も中断しない
pub struct InMemoryEventBus {
    handlers: RwLock<Vec<Box<dyn DynEventHandler>>>,
    serializer: EventSerializer,
    logger: Arc<dyn Logger>,
}

impl InMemoryEventBus {
    /// 新しいインメモリイベントバスを作成
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
            serializer: EventSerializer::new(),
            logger,
        }
    }

    /// BookingConfirmedハンドラーを登録
    pub async fn subscribe_booking_confirmed<H>(&self, handler: H) -> Result<(), EventBusError>
    where
        H: EventHandler<crate::domain::event::BookingConfirmed> + 'static,
    {
        let mut handlers = self.handlers.write().await;
        handlers.push(Box::new(BookingConfirmedHandlerWrapper::new(handler)));
        Ok(())
    }

    /// BookingCancelledハンドラーを登録
    pub async fn subscribe_booking_cancelled<H>(&self, handler: H) -> Result<(), EventBusError>
    where
        H: EventHandler<crate::domain::event::BookingCancelled> + 'static,
    {
        let mut handlers = self.handlers.write().await;
        handlers.push(Box::new(BookingCancelledHandlerWrapper::new(handler)));
        Ok(())
    }

    /// EventRegisteredハンドラーを登録
    pub async fn subscribe_event_registered<H>(&self, handler: H) -> Result<(), EventBusError>
    where
        H: EventHandler<crate::domain::event::EventRegistered> + 'static,
    {
        let mut handlers = self.handlers.write().await;
        handlers.push(Box::new(EventRegisteredHandlerWrapper::new(handler)));
        Ok(())
    }

    /// UserRegisteredハンドラーを登録
    pub async fn subscribe_user_registered<H>(&self, handler: H) -> Result<(), EventBusError>
    where
        H: EventHandler<crate::domain::event::UserRegistered> + 'static,
    {
        let mut handlers = self.handlers.write().await;
        handlers.push(Box::new(UserRegisteredHandlerWrapper::new(handler)));
        Ok(())
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: DomainEvent) -> Result<(), EventBusError> {
        // 発行内容をデバッグログに残す
        match self.serializer.serialize_event(&event) {
            Ok(json) => self.logger.debug(
                "EventBus",
                &format!("Event published: {}", json),
                Some(event.metadata().correlation_id),
                None,
            ),
            Err(err) => self.logger.warn(
                "EventBus",
                &format!("Event serialization failed: {}", err),
                Some(event.metadata().correlation_id),
                None,
            ),
        }

        let handlers = self.handlers.read().await;
        for handler in handlers.iter().filter(|h| h.can_handle(&event)) {
            if let Err(err) = handler.handle_event(&event).await {
                let mut context = HashMap::new();
                context.insert(
                    "handler_name".to_string(),
                    handler.handler_name().to_string(),
                );
                context.insert("event_type".to_string(), event.event_type().to_string());

                self.logger.error(
                    "EventBus",
                    &format!(
                        "{} failed to process {}: {}",
                        handler.handler_name(),
                        event.event_type(),
                        err
                    ),
                    Some(event.metadata().correlation_id),
                    Some(context),
                );
            }
        }

        Ok(())
    }
}
