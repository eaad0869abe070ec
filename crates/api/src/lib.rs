//! HTTP front end for reservation requests.
//!
//! Exposes the reservation handler over REST, with structured logging
//! (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use booking::{
    InMemoryBookingService, InMemoryCredentialProvider, InMemoryReservationStore,
    ReservationHandler,
};
use chrono::{Duration, Utc};
use domain::AccessCredential;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::routes::reservations::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/reservations", post(routes::reservations::create))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state over in-memory collaborators.
///
/// The caller starts signed in with a demo credential that expires after
/// `config.demo_token_ttl_minutes`.
pub fn create_default_state(config: &Config) -> Arc<AppState> {
    let store = InMemoryReservationStore::new();
    let credentials = InMemoryCredentialProvider::signed_in(AccessCredential::new(
        "demo-token",
        Utc::now() + Duration::minutes(config.demo_token_ttl_minutes),
    ));
    let booking = InMemoryBookingService::new();

    let handler = ReservationHandler::new(
        store.clone(),
        credentials.clone(),
        booking.clone(),
        store.clone(),
    );

    Arc::new(AppState {
        handler,
        store,
        credentials,
        booking,
    })
}
