//! Integration tests for the API server.

use std::sync::{Arc, OnceLock};

use api::config::Config;
use api::routes::reservations::AppState;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Days, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> (axum::Router, Arc<AppState>) {
    let state = api::create_default_state(&Config::default());
    let app = api::create_app(state.clone(), get_metrics_handle());
    (app, state)
}

fn days_out(n: u64) -> String {
    Utc::now()
        .date_naive()
        .checked_add_days(Days::new(n))
        .unwrap()
        .format("%Y-%m-%d")
        .to_string()
}

fn reservation_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/reservations")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_create_reservation() {
    let (app, state) = setup();

    let response = app
        .oneshot(reservation_request(serde_json::json!({
            "guest": "a@x.com",
            "date": days_out(30),
            "property": "P1"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    assert_eq!(json["outcome"], "success");
    assert_eq!(json["confirmation"]["confirmation_id"], 1);
    assert_eq!(state.store.recorded().len(), 1);
}

#[tokio::test]
async fn test_repeat_reservation_is_rejected() {
    let (app, _) = setup();
    let body = serde_json::json!({
        "guest": "a@x.com",
        "date": days_out(30),
        "property": "P1"
    });

    let first = app
        .clone()
        .oneshot(reservation_request(body.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.oneshot(reservation_request(body)).await.unwrap();
    assert_eq!(second.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = json_body(second).await;
    assert_eq!(json["outcome"], "validation_failed");
    assert_eq!(json["reasons"][0], "'P1' has already been reserved by you.");
}

#[tokio::test]
async fn test_too_soon_lists_every_reason() {
    let (app, _) = setup();

    let response = app
        .oneshot(reservation_request(serde_json::json!({
            "guest": "",
            "date": days_out(1),
            "property": "P1"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = json_body(response).await;
    assert_eq!(
        json["reasons"],
        serde_json::json!(["Guest identity is required", "Must be at least 7 days out"])
    );
}

#[tokio::test]
async fn test_signed_out_is_unauthorized() {
    let (app, state) = setup();
    state.credentials.sign_out();

    let response = app
        .oneshot(reservation_request(serde_json::json!({
            "guest": "a@x.com",
            "date": days_out(30),
            "property": "P1"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["outcome"], "credential_unavailable");
    assert_eq!(state.booking.call_count(), 0);
}

#[tokio::test]
async fn test_booking_outage_is_bad_gateway() {
    let (app, state) = setup();
    state.booking.set_fail_on_book(true);

    let response = app
        .oneshot(reservation_request(serde_json::json!({
            "guest": "a@x.com",
            "date": days_out(30),
            "property": "P1"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert_eq!(json["outcome"], "operation_failed");
    assert_eq!(json["message"], booking::GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_unrecorded_booking_is_accepted() {
    let (app, state) = setup();
    state.store.set_fail_on_record(true);

    let response = app
        .oneshot(reservation_request(serde_json::json!({
            "guest": "a@x.com",
            "date": days_out(30),
            "property": "P1"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = json_body(response).await;
    assert_eq!(json["outcome"], "booked_not_recorded");
    assert_eq!(state.booking.booking_count(), 1);
}

#[tokio::test]
async fn test_invalid_date_is_bad_request() {
    let (app, _) = setup();

    let response = app
        .oneshot(reservation_request(serde_json::json!({
            "guest": "a@x.com",
            "date": "15/01/2030",
            "property": "P1"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("Invalid date"));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (app, _) = setup();

    let response = app
        .clone()
        .oneshot(reservation_request(serde_json::json!({
            "guest": "m@x.com",
            "date": days_out(40),
            "property": "P9"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("reservation_requests_total"));
}
