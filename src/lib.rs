//! Fadeflow - booking backend for a single barbershop.
//!
//! Customers browse a fixed service catalog, see which slots of a day are
//! still open, and book one; the shop operator lists, cancels and reports
//! on bookings.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Slots, services, reservations and session mode
//! - **services**: Availability, reservation and operator use cases
//! - **infra**: Persistence (SeaORM and in-memory), rate limiting, clock
//! - **notifications**: Best-effort confirmation emails
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Start without Postgres or Redis
//! cargo run -- serve --in-memory
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Hash the operator password
//! cargo run -- hash-password 'correct horse battery'
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod notifications;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Reservation, Service, SessionMode, SlotTemplate};
pub use errors::{AppError, AppResult};
