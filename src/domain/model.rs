pub mod booking;
pub mod event;
pub mod user;
pub mod value_objects;

pub use booking::Booking;
pub use event::Event;
pub use user::User;
pub use value_objects::{
    BookingId, BookingStatus, EventDate, EventId, Money, TicketTier, UserId,
};
