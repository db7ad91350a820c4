//! Per-request session mode.

use serde::Serialize;
use utoipa::ToSchema;

/// Who is making the request.
///
/// Derived from the bearer token on every request; there is no server-side
/// session storage. Missing or invalid tokens mean `Guest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    #[default]
    Guest,
    Operator,
}

impl SessionMode {
    pub fn is_operator(&self) -> bool {
        matches!(self, SessionMode::Operator)
    }
}
