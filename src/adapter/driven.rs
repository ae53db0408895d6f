pub mod booking_repository;
pub mod console_logger;
pub mod event_bus;
pub mod event_repository;
pub mod user_repository;

pub use booking_repository::FlatFileBookingRepository;
pub use console_logger::ConsoleLogger;
pub use event_bus::InMemoryEventBus;
pub use event_repository::FlatFileEventRepository;
pub use user_repository::FlatFileUserRepository;
