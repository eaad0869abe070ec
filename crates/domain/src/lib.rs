//! Domain layer for vacation-property reservations.
//!
//! This crate provides the pure parts of reservation processing:
//! - The reservation data model (requests, existing bookings, credentials, confirmations)
//! - The validation rules deciding whether a request is admissible
//! - A Clock abstraction supplying "today" to the rules

pub mod clock;
pub mod reservation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use reservation::{
    AccessCredential, BookingConfirmation, ExistingReservation, MIN_LEAD_DAYS, Reservation,
    ReservationError, ReservationRequest, evaluate, validate,
};
