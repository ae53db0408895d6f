use crate::domain::event::DomainEvent;
use async_trait::async_trait;

/// イベントハンドラーエラー
#[derive(Debug, Clone, thiserror::Error)]
pub enum HandlerError {
    #[error("Handler processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Repository error: {0}")]
    RepositoryError(String),
    #[error("Domain error: {0}")]
    DomainError(String),
}

/// イベントハンドラートレイト
/// 特定のイベントタイプを処理するハンドラーを定義
#[async_trait]
pub trait EventHandler<E>: Send + Sync {
    async fn handle(&self, event: E) -> Result<(), HandlerError>;
}

/// 型消去されたイベントハンドラー
/// 異なるイベントタイプのハンドラーを統一的に扱うため
#[async_trait]
pub trait DynEventHandler: Send + Sync {
    async fn handle_event(&self, event: &DomainEvent) -> Result<(), HandlerError>;
    fn can_handle(&self, event: &DomainEvent) -> bool;
    fn handler_name(&self) -> &str;
}

/// BookingConfirmed用のハンドラーラッパー
pub struct BookingConfirmedHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::BookingConfirmed>,
{
    handler: H,
    name: String,
}

impl<H> BookingConfirmedHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::BookingConfirmed>,
{
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            name: "BookingConfirmedHandler".to_string(),
        }
    }

    pub fn with_name(handler: H, name: String) -> Self {
        Self { handler, name }
    }
}

#[async_trait]
impl<H> DynEventHandler for BookingConfirmedHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::BookingConfirmed>,
{
    async fn handle_event(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        match event {
            DomainEvent::BookingConfirmed(e) => self.handler.handle(e.clone()).await,
            _ => Err(HandlerError::ProcessingFailed(
                "Event type mismatch".to_string(),
            )),
        }
    }

    fn can_handle(&self, event: &DomainEvent) -> bool {
        matches!(event, DomainEvent::BookingConfirmed(_))
    }

    fn handler_name(&self) -> &str {
        &self.name
    }
}

/// BookingCancelled用のハンドラーラッパー
pub struct BookingCancelledHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::BookingCancelled>,
{
    handler: H,
    name: String,
}

impl<H> BookingCancelledHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::BookingCancelled>,
{
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            name: "BookingCancelledHandler".to_string(),
        }
    }

    pub fn with_name(handler: H, name: String) -> Self {
        Self { handler, name }
    }
}

#[async_trait]
impl<H> DynEventHandler for BookingCancelledHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::BookingCancelled>,
{
    async fn handle_event(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        match event {
            DomainEvent::BookingCancelled(e) => self.handler.handle(e.clone()).await,
            _ => Err(HandlerError::ProcessingFailed(
                "Event type mismatch".to_string(),
            )),
        }
    }

    fn can_handle(&self, event: &DomainEvent) -> bool {
        matches!(event, DomainEvent::BookingCancelled(_))
    }

    fn handler_name(&self) -> &str {
        &self.name
    }
}

/// EventRegistered用のハンドラーラッパー
pub struct EventRegisteredHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::EventRegistered>,
{
    handler: H,
    name: String,
}

impl<H> EventRegisteredHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::EventRegistered>,
{
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            name: "EventRegisteredHandler".to_string(),
        }
    }

    pub fn with_name(handler: H, name: String) -> Self {
        Self { handler, name }
    }
}

#[async_trait]
impl<H> DynEventHandler for EventRegisteredHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::EventRegistered>,
{
    async fn handle_event(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        match event {
            DomainEvent::EventRegistered(e) => self.handler.handle(e.clone()).await,
            _ => Err(HandlerError::ProcessingFailed(
                "Event type mismatch".to_string(),
            )),
        }
    }

    fn can_handle(&self, event: &DomainEvent) -> bool {
        matches!(event, DomainEvent::EventRegistered(_))
    }

    fn handler_name(&self) -> &str {
        &self.name
    }
}

/// UserRegistered用のハンドラーラッパー
pub struct UserRegisteredHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::UserRegistered>,
{
    handler: H,
    name: String,
}

impl<H> UserRegisteredHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::UserRegistered>,
{
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            name: "UserRegisteredHandler".to_string(),
        }
    }

    pub fn with_name(handler: H, name: String) -> Self {
        Self { handler, name }
    }
}

#[async_trait]
impl<H> DynEventHandler for UserRegisteredHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::UserRegistered>,
{
    async fn handle_event(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        match event {
            DomainEvent::UserRegistered(e) => self.handler.handle(e.clone()).await,
            _ => Err(HandlerError::ProcessingFailed(
                "Event type mismatch".to_string(),
            )),
        }
    }

    fn can_handle(&self, event: &DomainEvent) -> bool {
        matches!(event, DomainEvent::UserRegistered(_))
    }

    fn handler_name(&self) -> &str {
        &self.name
    }
}
