//! Domain layer - booking concepts independent of storage and transport.
//!
//! Contains: the service catalog entry, the daily slot template, reservations
//! with their contact details, operator statistics, and the session mode.

pub mod password;
pub mod reservation;
pub mod service;
pub mod session;
pub mod slot;
pub mod stats;

pub use password::Password;
pub use reservation::{ContactDetails, Reservation, ReservationStatus, ReservationWithService};
pub use service::Service;
pub use session::SessionMode;
pub use slot::{format_time_of_day, parse_time_of_day, SlotStatus, SlotTemplate, SlotTemplateError};
pub use stats::{BookingStats, DailyRevenue};
