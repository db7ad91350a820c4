//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, booking_handler, catalog_handler, operator_handler};
use crate::domain::{
    BookingStats, DailyRevenue, Reservation, ReservationStatus, ReservationWithService, Service,
    SessionMode, SlotStatus,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the Fadeflow booking API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fadeflow Booking API",
        version = "0.1.0",
        description = "Barbershop booking: service catalog, slot availability, reservations and the operator dashboard",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Catalog endpoints
        catalog_handler::list_services,
        catalog_handler::get_service,
        catalog_handler::booking_dates,
        catalog_handler::get_availability,
        // Booking endpoints
        booking_handler::create_booking,
        // Authentication endpoints
        auth_handler::login,
        auth_handler::session,
        // Operator endpoints
        operator_handler::list_bookings,
        operator_handler::cancel_booking,
        operator_handler::booking_stats,
    ),
    components(
        schemas(
            // Domain types
            Service,
            SlotStatus,
            Reservation,
            ReservationStatus,
            ReservationWithService,
            BookingStats,
            DailyRevenue,
            SessionMode,
            // Request/response types
            catalog_handler::AvailabilityResponse,
            catalog_handler::BookingDatesResponse,
            booking_handler::CreateBookingRequest,
            auth_handler::LoginRequest,
            auth_handler::SessionResponse,
            TokenResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Catalog", description = "Services, bookable dates and slot availability"),
        (name = "Bookings", description = "Customer reservations"),
        (name = "Authentication", description = "Operator login and session mode"),
        (name = "Operator", description = "Booking management and statistics")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
