//! Application settings loaded from environment variables.

use std::env;

use chrono::FixedOffset;
use thiserror::Error;

use super::constants::{
    DEFAULT_BOOKING_WINDOW_DAYS, DEFAULT_DATABASE_URL, DEFAULT_EMAILJS_API_URL,
    DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SHOP_UTC_OFFSET, MIN_JWT_SECRET_LENGTH,
};
use crate::domain::SlotTemplate;

/// Development-only signing key, accepted in debug builds
const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET environment variable must be set in production")]
    MissingJwtSecret,

    #[error("JWT_SECRET must be at least {0} characters long")]
    JwtSecretTooShort(usize),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Transactional email (EmailJS) settings.
#[derive(Clone, Default)]
pub struct EmailSettings {
    pub api_url: String,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    private_key: Option<String>,
}

impl EmailSettings {
    /// Build settings for an explicit EmailJS account.
    pub fn new(
        api_url: impl Into<String>,
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
        private_key: Option<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            service_id: Some(service_id.into()),
            template_id: Some(template_id.into()),
            public_key: Some(public_key.into()),
            private_key,
        }
    }

    /// Email delivery is enabled only when the account is fully configured.
    pub fn is_configured(&self) -> bool {
        self.service_id.is_some() && self.template_id.is_some() && self.public_key.is_some()
    }

    /// Server-side access token, if one was provided.
    pub fn private_key(&self) -> Option<&str> {
        self.private_key.as_deref()
    }
}

impl std::fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailSettings")
            .field("api_url", &self.api_url)
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &self.public_key.as_ref().map(|_| "[REDACTED]"))
            .field("private_key", &self.private_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub operator_email: Option<String>,
    operator_password_hash: Option<String>,
    pub shop_offset: FixedOffset,
    pub slot_template: SlotTemplate,
    pub booking_window_days: u32,
    pub email: EmailSettings,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("operator_email", &self.operator_email)
            .field("operator_password_hash", &"[REDACTED]")
            .field("shop_offset", &self.shop_offset)
            .field("slot_template", &self.slot_template)
            .field("booking_window_days", &self.booking_window_days)
            .field("email", &self.email)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            None => return Err(ConfigError::MissingJwtSecret),
        };

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::JwtSecretTooShort(MIN_JWT_SECRET_LENGTH));
        }

        let shop_offset = parse_utc_offset(
            &lookup("SHOP_UTC_OFFSET").unwrap_or_else(|| DEFAULT_SHOP_UTC_OFFSET.to_string()),
        )
        .ok_or_else(|| ConfigError::InvalidValue {
            key: "SHOP_UTC_OFFSET",
            reason: "expected a +HH:MM or -HH:MM offset".to_string(),
        })?;

        let slot_template = match lookup("SLOT_TEMPLATE") {
            Some(raw) => SlotTemplate::parse_list(&raw).map_err(|e| ConfigError::InvalidValue {
                key: "SLOT_TEMPLATE",
                reason: e.to_string(),
            })?,
            None => SlotTemplate::default(),
        };

        let booking_window_days = parse_or(&lookup, "BOOKING_WINDOW_DAYS", DEFAULT_BOOKING_WINDOW_DAYS)?;
        if booking_window_days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "BOOKING_WINDOW_DAYS",
                reason: "must be at least 1".to_string(),
            });
        }

        let email = EmailSettings {
            api_url: lookup("EMAILJS_API_URL")
                .unwrap_or_else(|| DEFAULT_EMAILJS_API_URL.to_string()),
            service_id: lookup("EMAILJS_SERVICE_ID"),
            template_id: lookup("EMAILJS_TEMPLATE_ID"),
            public_key: lookup("EMAILJS_PUBLIC_KEY"),
            private_key: lookup("EMAILJS_PRIVATE_KEY"),
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            redis_url: lookup("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            jwt_secret,
            jwt_expiration_hours: parse_or(
                &lookup,
                "JWT_EXPIRATION_HOURS",
                DEFAULT_JWT_EXPIRATION_HOURS,
            )?,
            server_host: lookup("SERVER_HOST")
                .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_or(&lookup, "SERVER_PORT", DEFAULT_SERVER_PORT)?,
            operator_email: lookup("OPERATOR_EMAIL"),
            operator_password_hash: lookup("OPERATOR_PASSWORD_HASH"),
            shop_offset,
            slot_template,
            booking_window_days,
            email,
        })
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Stored argon2 hash of the operator password.
    pub fn operator_password_hash(&self) -> Option<&str> {
        self.operator_password_hash.as_deref()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Parse an optional numeric variable, falling back to a default when unset.
fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Parse `+HH:MM` / `-HH:MM` into a fixed offset.
pub(crate) fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    let (sign, rest) = match raw.chars().next()? {
        '+' => (1, &raw[1..]),
        '-' => (-1, &raw[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
