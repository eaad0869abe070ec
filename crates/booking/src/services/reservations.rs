//! Reservation source/store traits and in-memory implementation.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{BookingConfirmation, ExistingReservation, Reservation};

use crate::error::ServiceError;

/// Read side: bookings already committed.
#[async_trait]
pub trait ReservationSource: Send + Sync {
    /// Returns every committed booking on the given date.
    async fn existing_for(&self, date: NaiveDate) -> Result<Vec<ExistingReservation>, ServiceError>;
}

/// Write side: records bookings confirmed by the booking service.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Records a confirmed booking.
    async fn record(
        &self,
        reservation: &Reservation,
        confirmation: &BookingConfirmation,
    ) -> Result<(), ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryReservationState {
    reservations: Vec<ExistingReservation>,
    recorded: Vec<(Reservation, BookingConfirmation)>,
    fail_on_fetch: bool,
    fail_on_record: bool,
}

/// In-memory reservation store.
///
/// Recorded bookings are added to the calendar, so later requests see them
/// as existing reservations.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReservationStore {
    state: Arc<RwLock<InMemoryReservationState>>,
}

impl InMemoryReservationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with committed bookings.
    pub fn with_reservations(reservations: impl IntoIterator<Item = ExistingReservation>) -> Self {
        let store = Self::new();
        store.write().reservations.extend(reservations);
        store
    }

    /// Configures the store to fail when existing reservations are fetched.
    pub fn set_fail_on_fetch(&self, fail: bool) {
        self.write().fail_on_fetch = fail;
    }

    /// Configures the store to fail when a booking is recorded.
    pub fn set_fail_on_record(&self, fail: bool) {
        self.write().fail_on_record = fail;
    }

    /// Returns the number of bookings on the calendar.
    pub fn reservation_count(&self) -> usize {
        self.read().reservations.len()
    }

    /// Returns the bookings recorded through [`ReservationStore::record`], oldest first.
    pub fn recorded(&self) -> Vec<(Reservation, BookingConfirmation)> {
        self.read().recorded.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, InMemoryReservationState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, InMemoryReservationState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ReservationSource for InMemoryReservationStore {
    async fn existing_for(&self, date: NaiveDate) -> Result<Vec<ExistingReservation>, ServiceError> {
        let state = self.read();

        if state.fail_on_fetch {
            return Err(ServiceError::ReservationSource(
                "Reservation calendar unavailable".to_string(),
            ));
        }

        Ok(state
            .reservations
            .iter()
            .filter(|r| r.date() == date)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn record(
        &self,
        reservation: &Reservation,
        confirmation: &BookingConfirmation,
    ) -> Result<(), ServiceError> {
        let mut state = self.write();

        if state.fail_on_record {
            return Err(ServiceError::ReservationStore(
                "Write rejected".to_string(),
            ));
        }

        state.reservations.push(reservation.to_existing());
        state.recorded.push((reservation.clone(), *confirmation));
        Ok(())
    }
}
