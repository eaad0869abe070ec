//! Reservation request handler.

use std::time::Instant;

use common::RequestId;
use domain::{BookingConfirmation, Clock, ReservationRequest, SystemClock, evaluate};

use crate::error::ServiceError;
use crate::outcome::OperationOutcome;
use crate::services::booking::BookingService;
use crate::services::credentials::CredentialProvider;
use crate::services::reservations::{ReservationSource, ReservationStore};
use crate::stage::RequestStage;

/// Processes reservation requests end to end.
///
/// The handler drives a request through existing-reservation lookup,
/// validation, credential lookup, booking and recording. Stages run strictly
/// in sequence and nothing is retried; the first failure decides the outcome.
pub struct ReservationHandler<R, C, B, P, K = SystemClock>
where
    R: ReservationSource,
    C: CredentialProvider,
    B: BookingService,
    P: ReservationStore,
    K: Clock,
{
    reservations: R,
    credentials: C,
    booking: B,
    store: P,
    clock: K,
}

/// Why a request stopped before completing every stage.
enum Halt {
    Invalid(Vec<String>),
    NoCredential,
    Service(ServiceError),
    NotRecorded(BookingConfirmation, ServiceError),
}

impl From<ServiceError> for Halt {
    fn from(err: ServiceError) -> Self {
        Halt::Service(err)
    }
}

impl From<Halt> for OperationOutcome {
    fn from(halt: Halt) -> Self {
        match halt {
            Halt::Invalid(reasons) => OperationOutcome::ValidationFailed { reasons },
            Halt::NoCredential => OperationOutcome::CredentialUnavailable,
            Halt::Service(err) => err.into(),
            Halt::NotRecorded(confirmation, err) => {
                OperationOutcome::not_recorded(confirmation, err)
            }
        }
    }
}

/// Tracks the stage a request has reached.
struct Progress {
    stage: RequestStage,
    started: Instant,
}

impl Progress {
    fn start() -> Self {
        tracing::debug!(stage = %RequestStage::default(), "stage started");
        Self {
            stage: RequestStage::default(),
            started: Instant::now(),
        }
    }

    fn advance(&mut self) {
        self.stage = self.stage.next();
        tracing::debug!(stage = %self.stage, "stage started");
    }

    /// Records the outcome and moves to `Done`.
    fn finish(mut self, outcome: &OperationOutcome) {
        let stopped_at = self.stage;
        self.stage = RequestStage::Done;
        tracing::debug!(stage = %self.stage, "stage started");
        let duration = self.started.elapsed().as_secs_f64();

        metrics::counter!("reservation_outcomes_total", "outcome" => outcome.kind()).increment(1);
        metrics::histogram!("reservation_duration_seconds").record(duration);

        if outcome.is_success() {
            tracing::info!(outcome = outcome.kind(), duration, "reservation completed");
        } else {
            tracing::warn!(
                outcome = outcome.kind(),
                stage = %stopped_at,
                duration,
                "reservation not completed"
            );
        }
    }
}

impl<R, C, B, P> ReservationHandler<R, C, B, P, SystemClock>
where
    R: ReservationSource,
    C: CredentialProvider,
    B: BookingService,
    P: ReservationStore,
{
    /// Creates a handler that validates against the system clock.
    pub fn new(reservations: R, credentials: C, booking: B, store: P) -> Self {
        Self::with_clock(reservations, credentials, booking, store, SystemClock)
    }
}

impl<R, C, B, P, K> ReservationHandler<R, C, B, P, K>
where
    R: ReservationSource,
    C: CredentialProvider,
    B: BookingService,
    P: ReservationStore,
    K: Clock,
{
    /// Creates a handler that takes "today" from the given clock.
    pub fn with_clock(reservations: R, credentials: C, booking: B, store: P, clock: K) -> Self {
        Self {
            reservations,
            credentials,
            booking,
            store,
            clock,
        }
    }

    /// Processes a reservation request, stopping at the first failing stage.
    #[tracing::instrument(
        skip(self, request),
        fields(request_id = %RequestId::new(), property = %request.property, date = %request.date)
    )]
    pub async fn handle(&self, request: ReservationRequest) -> OperationOutcome {
        metrics::counter!("reservation_requests_total").increment(1);
        let mut progress = Progress::start();

        let outcome = match self.run(&request, &mut progress).await {
            Ok(confirmation) => OperationOutcome::Success { confirmation },
            Err(halt) => halt.into(),
        };

        progress.finish(&outcome);
        outcome
    }

    async fn run(
        &self,
        request: &ReservationRequest,
        progress: &mut Progress,
    ) -> Result<BookingConfirmation, Halt> {
        let existing = self.reservations.existing_for(request.date).await?;

        progress.advance();
        let reservation =
            evaluate(request, &existing, self.clock.today()).map_err(Halt::Invalid)?;

        progress.advance();
        let credential = self
            .credentials
            .access_credential()
            .await?
            .ok_or(Halt::NoCredential)?;

        progress.advance();
        let confirmation = self.booking.book(&credential, &reservation).await?;

        progress.advance();
        self.store
            .record(&reservation, &confirmation)
            .await
            .map_err(|err| Halt::NotRecorded(confirmation, err))?;

        Ok(confirmation)
    }

    /// Processes a reservation request with every stage's result matched explicitly.
    ///
    /// Produces the same outcome as [`handle`](Self::handle) for the same
    /// collaborator behavior.
    #[tracing::instrument(
        skip(self, request),
        fields(request_id = %RequestId::new(), property = %request.property, date = %request.date)
    )]
    pub async fn handle_explicit(&self, request: ReservationRequest) -> OperationOutcome {
        metrics::counter!("reservation_requests_total").increment(1);
        let mut progress = Progress::start();

        let outcome = match self.reservations.existing_for(request.date).await {
            Err(err) => OperationOutcome::from(err),
            Ok(existing) => {
                progress.advance();
                match evaluate(&request, &existing, self.clock.today()) {
                    Err(reasons) => OperationOutcome::ValidationFailed { reasons },
                    Ok(reservation) => {
                        progress.advance();
                        match self.credentials.access_credential().await {
                            Err(err) => OperationOutcome::from(err),
                            Ok(None) => OperationOutcome::CredentialUnavailable,
                            Ok(Some(credential)) => {
                                progress.advance();
                                match self.booking.book(&credential, &reservation).await {
                                    Err(err) => OperationOutcome::from(err),
                                    Ok(confirmation) => {
                                        progress.advance();
                                        match self.store.record(&reservation, &confirmation).await
                                        {
                                            Ok(()) => OperationOutcome::Success { confirmation },
                                            Err(err) => {
                                                OperationOutcome::not_recorded(confirmation, err)
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        };

        progress.finish(&outcome);
        outcome
    }
}
