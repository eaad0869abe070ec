//! Reservation request endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use booking::{
    InMemoryBookingService, InMemoryCredentialProvider, InMemoryReservationStore,
    OperationOutcome, ReservationHandler,
};
use chrono::NaiveDate;
use domain::ReservationRequest;
use serde::Deserialize;

use crate::error::ApiError;

/// Handler wired to the in-memory collaborators.
pub type DemoHandler = ReservationHandler<
    InMemoryReservationStore,
    InMemoryCredentialProvider,
    InMemoryBookingService,
    InMemoryReservationStore,
>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub handler: DemoHandler,
    pub store: InMemoryReservationStore,
    pub credentials: InMemoryCredentialProvider,
    pub booking: InMemoryBookingService,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreateReservationRequest {
    pub guest: String,
    pub date: String,
    pub property: String,
}

impl TryFrom<CreateReservationRequest> for ReservationRequest {
    type Error = ApiError;

    fn try_from(req: CreateReservationRequest) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&req.date, "%Y-%m-%d")
            .map_err(|e| ApiError::BadRequest(format!("Invalid date '{}': {e}", req.date)))?;
        Ok(ReservationRequest::new(req.guest, date, req.property))
    }
}

// -- Handlers --

/// POST /reservations — validate and book a property for a date.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<OperationOutcome>), ApiError> {
    let request = ReservationRequest::try_from(req)?;
    let outcome = state.handler.handle(request).await;
    Ok((status_for(&outcome), Json(outcome)))
}

/// Maps each outcome to the HTTP status the caller acts on.
pub fn status_for(outcome: &OperationOutcome) -> StatusCode {
    match outcome {
        OperationOutcome::Success { .. } => StatusCode::CREATED,
        OperationOutcome::BookedNotRecorded { .. } => StatusCode::ACCEPTED,
        OperationOutcome::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        OperationOutcome::CredentialUnavailable => StatusCode::UNAUTHORIZED,
        OperationOutcome::OperationFailed { .. } => StatusCode::BAD_GATEWAY,
    }
}
