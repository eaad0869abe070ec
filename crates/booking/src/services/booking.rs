//! Third-party booking service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use common::ConfirmationId;
use domain::{AccessCredential, BookingConfirmation, Reservation};

use crate::error::ServiceError;

/// Trait for the external booking call.
///
/// Booking is irreversible. Implementations report a rejected credential as
/// [`ServiceError::Unauthorized`] and a refusal as [`ServiceError::Declined`].
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Books the property described by `reservation`.
    async fn book(
        &self,
        credential: &AccessCredential,
        reservation: &Reservation,
    ) -> Result<BookingConfirmation, ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryBookingState {
    bookings: HashMap<ConfirmationId, Reservation>,
    next_id: i64,
    call_count: usize,
    reject_credentials: bool,
    decline_reason: Option<String>,
    fail_on_book: bool,
}

/// In-memory booking service for testing.
///
/// Issues sequential confirmation numbers starting at 1 and rejects
/// credentials that have already expired.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingService {
    state: Arc<RwLock<InMemoryBookingState>>,
}

impl InMemoryBookingService {
    /// Creates a new in-memory booking service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to treat every credential as unauthorized.
    pub fn set_reject_credentials(&self, reject: bool) {
        self.write().reject_credentials = reject;
    }

    /// Configures the service to decline bookings with the given reason.
    pub fn set_decline(&self, reason: Option<String>) {
        self.write().decline_reason = reason;
    }

    /// Configures the service to fail with an outage.
    pub fn set_fail_on_book(&self, fail: bool) {
        self.write().fail_on_book = fail;
    }

    /// Returns how many times `book` was called, successful or not.
    pub fn call_count(&self) -> usize {
        self.read().call_count
    }

    /// Returns the number of confirmed bookings.
    pub fn booking_count(&self) -> usize {
        self.read().bookings.len()
    }

    /// Returns the reservation confirmed under the given number.
    pub fn booking(&self, confirmation_id: ConfirmationId) -> Option<Reservation> {
        self.read().bookings.get(&confirmation_id).cloned()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, InMemoryBookingState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, InMemoryBookingState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl BookingService for InMemoryBookingService {
    async fn book(
        &self,
        credential: &AccessCredential,
        reservation: &Reservation,
    ) -> Result<BookingConfirmation, ServiceError> {
        let mut state = self.write();
        state.call_count += 1;

        if state.fail_on_book {
            return Err(ServiceError::BookingService(
                "Booking service unavailable".to_string(),
            ));
        }

        if state.reject_credentials || credential.is_expired_at(Utc::now()) {
            return Err(ServiceError::Unauthorized);
        }

        if let Some(reason) = &state.decline_reason {
            return Err(ServiceError::Declined(reason.clone()));
        }

        state.next_id += 1;
        let confirmation_id = ConfirmationId::new(state.next_id);
        state.bookings.insert(confirmation_id, reservation.clone());

        Ok(BookingConfirmation::new(confirmation_id))
    }
}
