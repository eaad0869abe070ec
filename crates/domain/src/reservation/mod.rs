//! Reservation model and admission rules.

mod model;
mod rules;
mod value_objects;

pub use model::{ExistingReservation, Reservation, ReservationRequest};
pub use rules::{MIN_LEAD_DAYS, evaluate, validate};
pub use value_objects::{AccessCredential, BookingConfirmation};

use common::PropertyId;
use thiserror::Error;

/// Reasons a reservation request can be rejected by validation.
///
/// The `Display` output of each variant is the human-readable reason
/// reported back to the guest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    /// The request carries no guest identity.
    #[error("Guest identity is required")]
    GuestRequired,

    /// The request carries no property.
    #[error("Property id is required")]
    PropertyRequired,

    /// The requested date is inside the minimum lead time.
    #[error("Must be at least {min_days} days out")]
    TooSoon { min_days: i64 },

    /// Another guest already holds the property on that date.
    #[error("'{property}' has already been reserved by someone else.")]
    ReservedBySomeoneElse { property: PropertyId },

    /// The same guest already holds the property on that date.
    #[error("'{property}' has already been reserved by you.")]
    AlreadyReservedByGuest { property: PropertyId },
}
