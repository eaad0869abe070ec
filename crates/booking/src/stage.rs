//! Reservation request stage machine.

use serde::{Deserialize, Serialize};

/// The stage a reservation request has reached.
///
/// Stages run strictly in order; a failure at any stage jumps straight to `Done`:
/// ```text
/// FetchingExisting ──► Validating ──► FetchingCredential ──► Booking ──► Persisting ──► Done
///        │                 │                  │                 │
///        └─────────────────┴──────────────────┴─────────────────┴──────────────────────► Done
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RequestStage {
    /// Loading reservations already committed for the date.
    #[default]
    FetchingExisting,

    /// Running the admission rules.
    Validating,

    /// Obtaining an access credential for the booking service.
    FetchingCredential,

    /// Calling the third-party booking service.
    Booking,

    /// Recording the confirmed booking.
    Persisting,

    /// An outcome has been produced (terminal state).
    Done,
}

impl RequestStage {
    /// Returns the stage that follows this one on the happy path.
    pub fn next(&self) -> RequestStage {
        match self {
            RequestStage::FetchingExisting => RequestStage::Validating,
            RequestStage::Validating => RequestStage::FetchingCredential,
            RequestStage::FetchingCredential => RequestStage::Booking,
            RequestStage::Booking => RequestStage::Persisting,
            RequestStage::Persisting | RequestStage::Done => RequestStage::Done,
        }
    }

    /// Returns true if this is the terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStage::Done)
    }

    /// Returns the stage name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStage::FetchingExisting => "FetchingExisting",
            RequestStage::Validating => "Validating",
            RequestStage::FetchingCredential => "FetchingCredential",
            RequestStage::Booking => "Booking",
            RequestStage::Persisting => "Persisting",
            RequestStage::Done => "Done",
        }
    }
}

impl std::fmt::Display for RequestStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
