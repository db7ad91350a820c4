//! Notifier implementations.

use async_trait::async_trait;
use serde::Serialize;

use super::{BookingNotice, NotificationError, Notifier};
use crate::config::EmailSettings;

/// Sends confirmations through the EmailJS REST API.
pub struct EmailJsNotifier {
    client: reqwest::Client,
    settings: EmailSettings,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    customer_name: &'a str,
    customer_email: &'a str,
    service_name: &'a str,
    appointment_time: &'a str,
}

impl EmailJsNotifier {
    /// `None` unless the account settings are complete.
    pub fn new(settings: EmailSettings) -> Option<Self> {
        if !settings.is_configured() {
            return None;
        }
        Some(Self {
            client: reqwest::Client::new(),
            settings,
        })
    }
}

#[async_trait]
impl Notifier for EmailJsNotifier {
    async fn send(&self, notice: &BookingNotice) -> Result<(), NotificationError> {
        let body = SendRequest {
            service_id: self.settings.service_id.as_deref().unwrap_or_default(),
            template_id: self.settings.template_id.as_deref().unwrap_or_default(),
            user_id: self.settings.public_key.as_deref().unwrap_or_default(),
            access_token: self.settings.private_key(),
            template_params: TemplateParams {
                customer_name: &notice.recipient_name,
                customer_email: &notice.recipient_email,
                service_name: &notice.service_name,
                appointment_time: &notice.appointment,
            },
        };

        let response = self
            .client
            .post(&self.settings.api_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(to = %notice.recipient_email, "Confirmation email accepted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotificationError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

/// Development notifier: logs the email instead of sending it.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notice: &BookingNotice) -> Result<(), NotificationError> {
        tracing::info!(
            "=== EMAIL (not sent) ===\n\
             To: {} <{}>\n\
             Service: {}\n\
             When: {}\n\
             ========================",
            notice.recipient_name,
            notice.recipient_email,
            notice.service_name,
            notice.appointment
        );
        Ok(())
    }
}
