//! Operator login and session inspection.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::SessionMode;
use crate::errors::{AppError, AppResult};
use crate::services::TokenResponse;

/// Operator login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Operator email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "owner@fadeflow.test")]
    pub email: String,
    /// Operator password
    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    #[schema(example = "ClipperGuard42")]
    pub password: String,
}

/// Current session mode
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub mode: SessionMode,
}

/// Login route, mounted under `/auth`
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Session route
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/session", get(session))
}

/// Login and get an operator token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let auth = state.auth_service.clone();

    // argon2 verification is CPU bound
    let token = tokio::task::spawn_blocking(move || auth.login(&payload.email, &payload.password))
        .await
        .map_err(|e| AppError::internal(format!("Login task failed: {}", e)))??;

    Ok(Json(token))
}

/// Report whether the caller is a guest or the operator
#[utoipa::path(
    get,
    path = "/session",
    tag = "Authentication",
    responses((status = 200, description = "Session mode", body = SessionResponse)),
    security((), ("bearer_auth" = []))
)]
pub async fn session(mode: Option<Extension<SessionMode>>) -> Json<SessionResponse> {
    let mode = mode.map(|Extension(mode)| mode).unwrap_or_default();
    Json(SessionResponse { mode })
}
