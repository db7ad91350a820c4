//! Bearer token handling: session mode for every request, and the
//! operator gate for `/operator` routes.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::SessionMode;
use crate::errors::AppError;

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
}

/// Derive the [`SessionMode`] and insert it into the request extensions.
///
/// Never rejects: a missing, expired or invalid token simply means `Guest`.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let mode = bearer_token(&request)
        .and_then(|token| state.auth_service.verify_token(token).ok())
        .map(|claims| claims.session_mode())
        .unwrap_or_default();

    request.extensions_mut().insert(mode);

    next.run(request).await
}

/// Reject the request unless it carries a valid operator token.
pub async fn operator_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or(AppError::Unauthorized)?;
    let claims = state.auth_service.verify_token(token)?;

    let mode = claims.session_mode();
    require_operator(mode)?;
    request.extensions_mut().insert(mode);

    Ok(next.run(request).await)
}

/// Forbidden unless the session is in operator mode.
pub fn require_operator(mode: SessionMode) -> Result<(), AppError> {
    if mode.is_operator() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
