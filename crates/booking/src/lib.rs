//! Reservation request processing.
//!
//! This crate composes the validation rules from `domain` with the external
//! collaborators a booking needs:
//! 1. Fetch existing reservations for the requested date
//! 2. Validate the request
//! 3. Fetch an access credential
//! 4. Book the property with the third-party service
//! 5. Record the confirmed booking
//!
//! Every failure along the way is mapped into a single [`OperationOutcome`].

pub mod error;
pub mod handler;
pub mod outcome;
pub mod services;
pub mod stage;

pub use error::ServiceError;
pub use handler::ReservationHandler;
pub use outcome::{GENERIC_FAILURE_MESSAGE, OperationOutcome};
pub use services::{
    BookingService, CredentialProvider, InMemoryBookingService, InMemoryCredentialProvider,
    InMemoryReservationStore, ReservationSource, ReservationStore,
};
pub use stage::RequestStage;
