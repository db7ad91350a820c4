//! Booking confirmation notifications.
//!
//! Delivery is best-effort: a [`NotificationDispatcher`] runs each send on a
//! detached task, and failures surface only on the failure channel and in
//! the log. [`NotificationError`] deliberately has no conversion into
//! [`crate::errors::AppError`].

mod dispatcher;
mod email;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;
use uuid::Uuid;

pub use dispatcher::{log_failures, NotificationDispatcher};
pub use email::{EmailJsNotifier, LogNotifier};

/// Why a single delivery attempt failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationError {
    #[error("email provider unreachable: {0}")]
    Transport(String),

    #[error("email provider rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("delivery timed out after {0}s")]
    Timeout(u64),
}

/// Confirmation message for one reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingNotice {
    pub recipient_name: String,
    pub recipient_email: String,
    pub service_name: String,
    /// Human-readable appointment time, e.g. "Tuesday, June 10, 2025 at 09:30"
    pub appointment: String,
}

impl BookingNotice {
    pub fn new(
        recipient_name: impl Into<String>,
        recipient_email: impl Into<String>,
        service_name: impl Into<String>,
        starts_at: NaiveDateTime,
    ) -> Self {
        Self {
            recipient_name: recipient_name.into(),
            recipient_email: recipient_email.into(),
            service_name: service_name.into(),
            appointment: describe_appointment(starts_at),
        }
    }
}

/// A notification that was given up on.
#[derive(Debug, Clone)]
pub struct NotificationFailure {
    pub reservation_id: Uuid,
    pub recipient: String,
    pub attempts: u32,
    pub error: NotificationError,
}

/// Outbound confirmation channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notice: &BookingNotice) -> Result<(), NotificationError>;
}

/// Long-form appointment description used in emails.
pub fn describe_appointment(starts_at: NaiveDateTime) -> String {
    starts_at.format("%A, %B %-d, %Y at %H:%M").to_string()
}
