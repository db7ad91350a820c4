//! Fire-and-forget notification dispatch with a bounded retry.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::{BookingNotice, NotificationError, NotificationFailure, Notifier};
use crate::config::{NOTIFICATION_MAX_RETRIES, NOTIFICATION_RETRY_DELAY_MS, NOTIFICATION_TIMEOUT_SECONDS};

/// Runs notifier calls on detached tasks.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    failures: mpsc::UnboundedSender<NotificationFailure>,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
}

impl NotificationDispatcher {
    /// Dispatcher with the default timeout and retry policy, plus the
    /// receiving end of its failure channel.
    pub fn new(
        notifier: Arc<dyn Notifier>,
    ) -> (Self, mpsc::UnboundedReceiver<NotificationFailure>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            notifier,
            failures: tx,
            timeout: Duration::from_secs(NOTIFICATION_TIMEOUT_SECONDS),
            max_retries: NOTIFICATION_MAX_RETRIES,
            retry_delay: Duration::from_millis(NOTIFICATION_RETRY_DELAY_MS),
        };
        (dispatcher, rx)
    }

    /// Override the per-attempt timeout and the pause between attempts.
    pub fn with_timing(mut self, timeout: Duration, retry_delay: Duration) -> Self {
        self.timeout = timeout;
        self.retry_delay = retry_delay;
        self
    }

    /// Send `notice` in the background. The caller never waits on delivery;
    /// the handle is only useful to tests.
    pub fn dispatch(&self, reservation_id: Uuid, notice: BookingNotice) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move { this.deliver(reservation_id, notice).await })
    }

    async fn deliver(&self, reservation_id: Uuid, notice: BookingNotice) {
        let attempts = self.max_retries + 1;
        let mut last_error = None;

        for attempt in 1..=attempts {
            match self.attempt(&notice).await {
                Ok(()) => {
                    tracing::info!(
                        reservation_id = %reservation_id,
                        attempt,
                        "Booking confirmation sent"
                    );
                    return;
                }
                Err(e) => {
                    tracing::warn!(
                        reservation_id = %reservation_id,
                        attempt,
                        error = %e,
                        "Booking confirmation attempt failed"
                    );
                    last_error = Some(e);
                    if attempt < attempts {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        let Some(error) = last_error else { return };

        tracing::error!(
            reservation_id = %reservation_id,
            recipient = %notice.recipient_email,
            attempts,
            error = %error,
            "Booking confirmation not delivered"
        );

        // Receiver gone means nobody is listening; the log above is enough
        let _ = self.failures.send(NotificationFailure {
            reservation_id,
            recipient: notice.recipient_email,
            attempts,
            error,
        });
    }

    async fn attempt(&self, notice: &BookingNotice) -> Result<(), NotificationError> {
        match tokio::time::timeout(self.timeout, self.notifier.send(notice)).await {
            Ok(result) => result,
            Err(_) => Err(NotificationError::Timeout(self.timeout.as_secs())),
        }
    }
}

/// Drain the failure channel into the error log until every sender is gone.
pub async fn log_failures(mut failures: mpsc::UnboundedReceiver<NotificationFailure>) {
    while let Some(failure) = failures.recv().await {
        tracing::error!(
            reservation_id = %failure.reservation_id,
            recipient = %failure.recipient,
            attempts = failure.attempts,
            error = %failure.error,
            "Notification failure recorded"
        );
    }
}
