//! Operator dashboard: booking list, cancellation and revenue statistics.
//!
//! Mounted behind `operator_middleware`; every route here requires an
//! operator bearer token.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get},
    Router,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use super::params::parse_from;
use crate::api::AppState;
use crate::domain::{BookingStats, Reservation, ReservationWithService};
use crate::errors::AppResult;

/// Booking list filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    /// Inclusive lower bound on start (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    pub from: Option<String>,
    /// Only bookings starting from now on
    #[serde(default)]
    pub upcoming: bool,
}

/// Statistics filter
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    /// Inclusive lower bound on start (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    pub from: Option<String>,
}

/// Create operator routes, mounted under `/operator`
pub fn operator_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings))
        .route("/bookings/:id", delete(cancel_booking))
        .route("/stats", get(booking_stats))
}

fn lower_bound(
    state: &AppState,
    from: Option<&str>,
    upcoming: bool,
) -> AppResult<Option<NaiveDateTime>> {
    let from = from.map(parse_from).transpose()?;
    if !upcoming {
        return Ok(from);
    }

    let now = state.clock.now();
    Ok(Some(from.map_or(now, |from| from.max(now))))
}

/// List reservations in start order
#[utoipa::path(
    get,
    path = "/operator/bookings",
    tag = "Operator",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Reservations with service details", body = Vec<ReservationWithService>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the operator")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<ReservationWithService>>> {
    let from = lower_bound(&state, query.from.as_deref(), query.upcoming)?;
    let bookings = state.bookings.list_reservations(from).await?;
    Ok(Json(bookings))
}

/// Cancel a reservation, freeing its slot
#[utoipa::path(
    delete,
    path = "/operator/bookings/{id}",
    tag = "Operator",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = Reservation),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the operator"),
        (status = 404, description = "Reservation not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.bookings.cancel_reservation(id).await?;
    Ok(Json(reservation))
}

/// Revenue and booking counts per day
#[utoipa::path(
    get,
    path = "/operator/stats",
    tag = "Operator",
    params(StatsQuery),
    responses(
        (status = 200, description = "Booking statistics", body = BookingStats),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the operator")
    ),
    security(("bearer_auth" = []))
)]
pub async fn booking_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<BookingStats>> {
    let from = query.from.as_deref().map(parse_from).transpose()?;
    let stats = state.bookings.stats(from).await?;
    Ok(Json(stats))
}
