//! Serve command - Starts the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Database, LocalRateLimiter, Persistence, RateLimiter, SystemClock};
use crate::notifications::{log_failures, EmailJsNotifier, LogNotifier, NotificationDispatcher, Notifier};
use crate::services::Services;

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    let clock = Arc::new(SystemClock::new(config.shop_offset));

    // Email delivery falls back to the log when EmailJS is not configured
    let notifier: Arc<dyn Notifier> = match EmailJsNotifier::new(config.email.clone()) {
        Some(email) => Arc::new(email),
        None => {
            tracing::warn!("EmailJS not configured, confirmation emails will only be logged");
            Arc::new(LogNotifier)
        }
    };
    let (dispatcher, failures) = NotificationDispatcher::new(notifier);
    tokio::spawn(log_failures(failures));

    let app_state = if args.in_memory {
        tracing::warn!("Running with in-memory storage; bookings are lost on shutdown");

        let uow = Arc::new(Persistence::in_memory());
        let services = Services::build(uow, &config, clock.clone(), dispatcher);
        let rate_limiter: Arc<dyn RateLimiter> = Arc::new(LocalRateLimiter::new());

        AppState::new(&services, rate_limiter, clock)
    } else {
        let db = Database::connect(&config)
            .await
            .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

        let cache = Arc::new(
            Cache::connect(&config)
                .await
                .map_err(|e| AppError::internal(format!("Redis connection failed: {}", e)))?,
        );

        let uow = Arc::new(Persistence::from_connection(db.get_connection()));
        let services = Services::build(uow, &config, clock.clone(), dispatcher);

        AppState::new(&services, cache.clone(), clock)
            .with_health_check(Arc::new(db))
            .with_health_check(cache)
    };

    let app = create_router(app_state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    // Connection info feeds the per-client rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
