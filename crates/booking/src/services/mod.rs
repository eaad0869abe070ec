//! Collaborator traits and in-memory implementations for reservation processing.

pub mod booking;
pub mod credentials;
pub mod reservations;

pub use booking::{BookingService, InMemoryBookingService};
pub use credentials::{CredentialProvider, InMemoryCredentialProvider};
pub use reservations::{InMemoryReservationStore, ReservationSource, ReservationStore};
