//! Shared identifier types for the reservation system.

mod types;

pub use types::{ConfirmationId, GuestId, PropertyId, RequestId};
