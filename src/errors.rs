//! Centralized error handling.
//!
//! One error type for the whole booking flow, with automatic HTTP response
//! conversion. Notification failures are deliberately NOT part of this enum;
//! see [`crate::notifications::NotificationError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Operator access required")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Booking flow
    #[error("{0}")]
    Validation(String),

    #[error("Resource not found")]
    NotFound,

    #[error("{0}")]
    InvalidDate(String),

    #[error("{0}")]
    InvalidSlot(String),

    #[error("This time slot has just been taken")]
    SlotTaken,

    // External service errors
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound => "NOT_FOUND",
            AppError::InvalidDate(_) => "INVALID_DATE",
            AppError::InvalidSlot(_) => "INVALID_SLOT",
            AppError::SlotTaken => "SLOT_TAKEN",
            AppError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::SlotTaken => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::InvalidDate(_) | AppError::InvalidSlot(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the client can fix the problem by changing its input.
    pub fn is_recoverable_by_user(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::InvalidDate(_)
                | AppError::InvalidSlot(_)
                | AppError::SlotTaken
        )
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::InvalidDate(msg)
            | AppError::InvalidSlot(msg) => msg.clone(),

            AppError::StoreUnavailable(detail) => {
                tracing::error!(detail = %detail, "Reservation store unavailable");
                "The booking system is temporarily unavailable, please try again".to_string()
            }
            AppError::Jwt(e) => {
                tracing::warn!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::StoreUnavailable(err.to_string())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn invalid_date(msg: impl Into<String>) -> Self {
        AppError::InvalidDate(msg.into())
    }

    pub fn invalid_slot(msg: impl Into<String>) -> Self {
        AppError::InvalidSlot(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_409() {
        assert_eq!(AppError::SlotTaken.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::SlotTaken.code(), "SLOT_TAKEN");
    }

    #[test]
    fn test_store_failure_is_transient() {
        let err = AppError::StoreUnavailable("connection refused".into());
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(!err.is_recoverable_by_user());
    }

    #[test]
    fn test_store_failure_hides_detail() {
        let err = AppError::StoreUnavailable("password authentication failed for user".into());
        let message = err.user_message();
        assert!(!message.contains("password"));
        assert!(message.contains("try again"));
    }

    #[test]
    fn test_out_of_policy_selection_is_bad_request() {
        assert_eq!(AppError::invalid_date("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::invalid_slot("x").status(), StatusCode::BAD_REQUEST);
        assert!(AppError::invalid_slot("x").is_recoverable_by_user());
    }

    #[test]
    fn test_db_err_becomes_store_unavailable() {
        let err: AppError = sea_orm::DbErr::Custom("boom".into()).into();
        assert!(matches!(err, AppError::StoreUnavailable(_)));
    }

    #[test]
    fn test_option_ext() {
        let none: Option<u8> = None;
        assert!(matches!(none.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(3).ok_or_not_found().unwrap(), 3);
    }
}
