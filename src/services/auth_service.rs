//! Operator authentication.
//!
//! There is a single operator account, configured through `OPERATOR_EMAIL`
//! and `OPERATOR_PASSWORD_HASH`. A successful login yields an HS256 bearer
//! token whose lifetime is the operator session.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{Config, ROLE_OPERATOR, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, SessionMode};
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn session_mode(&self) -> SessionMode {
        if self.role == ROLE_OPERATOR {
            SessionMode::Operator
        } else {
            SessionMode::Guest
        }
    }
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 43200)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
pub trait AuthService: Send + Sync {
    /// Check operator credentials and issue a token
    fn login(&self, email: &str, password: &str) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Verifies the configured operator's credentials.
pub struct OperatorAuthenticator {
    config: Config,
}

impl OperatorAuthenticator {
    pub fn new(config: Config) -> Self {
        if config.operator_email.is_none() || config.operator_password_hash().is_none() {
            tracing::warn!("Operator credentials not configured, operator login is disabled");
        }
        Self { config }
    }

    fn generate_token(&self, subject: &str) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expiration_hours);

        let claims = Claims {
            sub: subject.to_string(),
            role: ROLE_OPERATOR.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.config.jwt_expiration_hours * SECONDS_PER_HOUR,
        })
    }
}

impl AuthService for OperatorAuthenticator {
    fn login(&self, email: &str, password: &str) -> AppResult<TokenResponse> {
        let operator_email = self
            .config
            .operator_email
            .as_deref()
            .filter(|configured| configured.eq_ignore_ascii_case(email.trim()));

        // Always run one argon2 verification so unknown emails cost the same
        let stored = operator_email
            .and(self.config.operator_password_hash())
            .map(Password::from_hash);

        match (operator_email, Password::verify_or_dummy(stored.as_ref(), password)) {
            (Some(subject), true) => {
                tracing::info!(operator = %subject, "Operator logged in");
                self.generate_token(subject)
            }
            _ => {
                tracing::warn!("Rejected operator login");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
