//! Customer booking submission.

use axum::{extract::State, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::Reservation;
use crate::errors::AppResult;
use crate::services::BookingRequest;
use crate::types::Created;

/// Booking form submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[schema(example = 1)]
    pub service_id: i32,
    /// Day of the appointment (YYYY-MM-DD)
    #[schema(example = "2025-06-10")]
    pub date: String,
    /// Template start time (HH:MM)
    #[schema(example = "09:30")]
    pub time: String,
    #[validate(length(max = 200))]
    #[schema(example = "Ama Mensah")]
    pub name: String,
    #[validate(length(max = 32))]
    #[schema(example = "0551234567")]
    pub phone: String,
    /// Optional address for the confirmation email
    #[validate(length(max = 254))]
    #[schema(example = "ama@example.com")]
    pub email: Option<String>,
}

/// Create booking routes
pub fn booking_routes() -> Router<AppState> {
    Router::new().route("/bookings", post(create_booking))
}

/// Book a slot
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Reservation confirmed", body = Reservation),
        (status = 400, description = "Invalid contact details, date or time"),
        (status = 404, description = "Service not found"),
        (status = 409, description = "Slot already taken"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateBookingRequest>,
) -> AppResult<Created<Reservation>> {
    let request = BookingRequest {
        service_id: payload.service_id,
        date: payload.date,
        time: payload.time,
        name: payload.name,
        phone: payload.phone,
        email: payload.email,
    };

    let reservation = state.bookings.commit_reservation(request).await?;

    Ok(Created(reservation))
}
