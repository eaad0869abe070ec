//! Collaborator error types.

use thiserror::Error;

/// Failures reported by the collaborators a reservation request depends on.
///
/// `Unauthorized` and `Declined` are expected outcomes of the booking call;
/// the remaining variants are unexpected faults, one per collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The access credential was expired or not accepted.
    #[error("Access credential rejected")]
    Unauthorized,

    /// The booking service refused the reservation.
    #[error("Booking declined: {0}")]
    Declined(String),

    /// Existing reservations could not be loaded.
    #[error("Reservation source error: {0}")]
    ReservationSource(String),

    /// The credential provider failed.
    #[error("Credential provider error: {0}")]
    CredentialProvider(String),

    /// The booking service failed.
    #[error("Booking service error: {0}")]
    BookingService(String),

    /// The confirmed booking could not be recorded.
    #[error("Reservation store error: {0}")]
    ReservationStore(String),
}

impl ServiceError {
    /// Returns true for credential failures the caller can fix by signing in again.
    pub fn is_authorization(&self) -> bool {
        matches!(self, ServiceError::Unauthorized)
    }
}

/// Convenience type alias for collaborator results.
pub type Result<T> = std::result::Result<T, ServiceError>;
