//! Dependency health checks reported by `GET /health`.

use async_trait::async_trait;

/// A backing system that can be pinged.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Label shown in the health report
    fn name(&self) -> &'static str;

    /// Round-trip to the dependency; the error text is reported as-is.
    async fn ping(&self) -> Result<(), String>;
}
