pub mod booking_engine;
pub mod reporting;

pub use booking_engine::{BookingConfirmation, BookingEngine, CancellationSummary};
pub use reporting::BookingTotals;
