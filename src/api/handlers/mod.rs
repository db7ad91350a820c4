//! HTTP request handlers.

pub mod auth_handler;
pub mod booking_handler;
pub mod catalog_handler;
pub mod operator_handler;
mod params;

pub use auth_handler::{auth_routes, session_routes};
pub use booking_handler::booking_routes;
pub use catalog_handler::catalog_routes;
pub use operator_handler::operator_routes;
