//! HTTP middleware.

mod auth;
mod rate_limit;

pub use auth::{operator_middleware, require_operator, session_middleware};
pub use rate_limit::{rate_limit_middleware, rate_limit_strict_middleware, RateLimitError};
