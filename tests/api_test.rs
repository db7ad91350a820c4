//! Router-level tests: requests go through the full middleware stack over
//! the in-memory store, a local rate limiter and a fixed clock.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use fadeflow::api::{create_router, AppState};
use fadeflow::config::Config;
use fadeflow::domain::Password;
use fadeflow::infra::{Clock, FixedClock, LocalRateLimiter, Persistence};
use fadeflow::notifications::{LogNotifier, NotificationDispatcher};
use fadeflow::services::Services;

const OPERATOR_EMAIL: &str = "owner@fadeflow.test";
const OPERATOR_PASSWORD: &str = "ClipperGuard42";

// =============================================================================
// Test Helpers
// =============================================================================

fn app() -> Router {
    let hash = Password::new(OPERATOR_PASSWORD).unwrap().into_string();
    let config = Config::from_lookup(move |key| match key {
        "JWT_SECRET" => Some("test-secret-key-for-testing-only-32chars".to_string()),
        "OPERATOR_EMAIL" => Some(OPERATOR_EMAIL.to_string()),
        "OPERATOR_PASSWORD_HASH" => Some(hash.clone()),
        "SLOT_TEMPLATE" => Some("09:00,09:30".to_string()),
        _ => None,
    })
    .unwrap();

    let clock: Arc<dyn Clock> =
        Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()));
    let (dispatcher, _failures) = NotificationDispatcher::new(Arc::new(LogNotifier));
    let services = Services::build(
        Arc::new(Persistence::in_memory()),
        &config,
        clock.clone(),
        dispatcher,
    );

    create_router(AppState::new(
        &services,
        Arc::new(LocalRateLimiter::new()),
        clock,
    ))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_as(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn booking(time: &str) -> Value {
    json!({
        "service_id": 1,
        "date": "2025-06-10",
        "time": time,
        "name": "Ama",
        "phone": "0551234567",
    })
}

async fn operator_token(app: &Router) -> String {
    let (status, body) = send(
        app,
        post_json(
            "/auth/login",
            json!({ "email": OPERATOR_EMAIL, "password": OPERATOR_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

// =============================================================================
// Public Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_root_and_health() {
    let app = app();

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_service_catalog() {
    let app = app();

    let (status, body) = send(&app, get("/services")).await;
    assert_eq!(status, StatusCode::OK);
    let services = body.as_array().unwrap();
    assert_eq!(services.len(), 5);
    assert_eq!(services[0]["price"], "15.00");

    let (status, body) = send(&app, get("/services/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);

    let (status, body) = send(&app, get("/services/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_booking_dates_window() {
    let (status, body) = send(&app(), get("/booking-dates")).await;
    assert_eq!(status, StatusCode::OK);
    let dates = body["dates"].as_array().unwrap();
    assert_eq!(dates.len(), 5);
    assert_eq!(dates[0], "2025-06-10");
}

#[tokio::test]
async fn test_availability_errors() {
    let app = app();

    let (status, body) = send(&app, get("/services/1/availability?date=10-06-2025")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_DATE");

    let (status, body) = send(&app, get("/services/1/availability?date=2025-06-09")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_DATE");

    let (status, _) = send(&app, get("/services/42/availability?date=2025-06-10")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Booking Flow Tests
// =============================================================================

#[tokio::test]
async fn test_book_then_slot_is_taken() {
    let app = app();

    let (status, body) = send(&app, post_json("/bookings", booking("09:00"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "confirmed");
    assert_eq!(body["starts_at"], "2025-06-10T09:00:00");

    let (status, body) = send(&app, get("/services/1/availability?date=2025-06-10")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["open_slots"], json!(["09:30"]));
    assert_eq!(body["slots"][0], json!({ "time": "09:00", "available": false }));

    let (status, body) = send(&app, post_json("/bookings", booking("09:00"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "SLOT_TAKEN");
}

#[tokio::test]
async fn test_booking_validation_order() {
    let app = app();

    let mut bad_name = booking("09:00");
    bad_name["name"] = json!("  ");
    let (status, body) = send(&app, post_json("/bookings", bad_name)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].as_str().unwrap().starts_with("name"));

    // Contact details are checked before the time is even parsed
    let mut bad_name_and_time = booking("nine");
    bad_name_and_time["name"] = json!("");
    let (status, body) = send(&app, post_json("/bookings", bad_name_and_time)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].as_str().unwrap().starts_with("name"));

    let (status, body) = send(&app, post_json("/bookings", booking(" "))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "time: is required");

    let (status, body) = send(&app, post_json("/bookings", booking("09:15"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_SLOT");

    let (status, body) = send(&app, post_json("/bookings", booking("nine"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_SLOT");
}

// =============================================================================
// Session & Operator Tests
// =============================================================================

#[tokio::test]
async fn test_session_mode() {
    let app = app();

    let (_, body) = send(&app, get("/session")).await;
    assert_eq!(body["mode"], "guest");

    let (_, body) = send(&app, get_as("/session", "garbage")).await;
    assert_eq!(body["mode"], "guest");

    let token = operator_token(&app).await;
    let (_, body) = send(&app, get_as("/session", &token)).await;
    assert_eq!(body["mode"], "operator");
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let (status, body) = send(
        &app(),
        post_json(
            "/auth/login",
            json!({ "email": OPERATOR_EMAIL, "password": "wrong-password" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_operator_routes_require_token() {
    let app = app();

    let (status, _) = send(&app, get("/operator/bookings")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get_as("/operator/stats", "not.a.jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_operator_cancel_reopens_slot() {
    let app = app();
    let token = operator_token(&app).await;

    let (_, created) = send(&app, post_json("/bookings", booking("09:30"))).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, get_as("/operator/bookings?from=2025-06-10", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["service_name"], "Beard Trim");

    let (status, body) = send(&app, get_as("/operator/stats", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_bookings"], 1);
    assert_eq!(body["total_revenue"], "15.00");

    let delete = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/operator/bookings/{}", id))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, delete).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");

    let (_, body) = send(&app, get("/services/1/availability?date=2025-06-10")).await;
    assert_eq!(body["open_slots"], json!(["09:00", "09:30"]));
}

#[tokio::test]
async fn test_strict_rate_limit_on_login() {
    let app = app();
    let attempt = || {
        post_json(
            "/auth/login",
            json!({ "email": "nobody@fadeflow.test", "password": "guess" }),
        )
    };

    for _ in 0..10 {
        let (status, _) = send(&app, attempt()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let (status, body) = send(&app, attempt()).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], "RATE_LIMITED");
}
