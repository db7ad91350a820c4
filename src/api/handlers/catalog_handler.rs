//! Public catalog and availability handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::params::parse_date;
use crate::api::AppState;
use crate::domain::{format_time_of_day, Service, SlotStatus};
use crate::errors::AppResult;

/// Availability query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Day to inspect (YYYY-MM-DD)
    #[param(example = "2025-06-10")]
    pub date: String,
}

/// Open slots of one service on one day
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub service_id: i32,
    #[schema(value_type = String, example = "2025-06-10")]
    pub date: NaiveDate,
    /// Bookable start times in template order
    #[schema(example = json!(["09:00", "10:30"]))]
    pub open_slots: Vec<String>,
    /// Every template slot with its availability
    pub slots: Vec<SlotStatus>,
}

/// Dates currently open for booking
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDatesResponse {
    #[schema(value_type = Vec<String>, example = json!(["2025-06-10", "2025-06-11"]))]
    pub dates: Vec<NaiveDate>,
}

/// Create catalog routes
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services))
        .route("/services/:id", get(get_service))
        .route("/services/:id/availability", get(get_availability))
        .route("/booking-dates", get(booking_dates))
}

/// List services, cheapest first
#[utoipa::path(
    get,
    path = "/services",
    tag = "Catalog",
    responses(
        (status = 200, description = "Service catalog", body = Vec<Service>),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn list_services(State(state): State<AppState>) -> AppResult<Json<Vec<Service>>> {
    let services = state.catalog.list_services().await?;
    Ok(Json(services))
}

/// Get a service by ID
#[utoipa::path(
    get,
    path = "/services/{id}",
    tag = "Catalog",
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service found", body = Service),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Service>> {
    let service = state.catalog.get_service(id).await?;
    Ok(Json(service))
}

/// Dates offered for booking, today first
#[utoipa::path(
    get,
    path = "/booking-dates",
    tag = "Catalog",
    responses((status = 200, description = "Bookable dates", body = BookingDatesResponse))
)]
pub async fn booking_dates(State(state): State<AppState>) -> Json<BookingDatesResponse> {
    Json(BookingDatesResponse {
        dates: state.availability.booking_dates(),
    })
}

/// Open slots for a service on a date
#[utoipa::path(
    get,
    path = "/services/{id}/availability",
    tag = "Catalog",
    params(("id" = i32, Path, description = "Service ID"), AvailabilityQuery),
    responses(
        (status = 200, description = "Slot availability", body = AvailabilityResponse),
        (status = 400, description = "Date malformed or outside the booking window"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get_availability(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let date = parse_date(&query.date)?;
    let slots = state.availability.slot_grid(id, date).await?;

    let open_slots = slots
        .iter()
        .filter(|slot| slot.available)
        .map(|slot| format_time_of_day(slot.time))
        .collect();

    Ok(Json(AvailabilityResponse {
        service_id: id,
        date,
        open_slots,
        slots,
    }))
}
