//! Terminal outcome of a reservation request.

use domain::BookingConfirmation;
use serde::Serialize;

use crate::error::ServiceError;

/// Message reported for faults the guest cannot act on.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "The reservation could not be completed. Please try again later.";

/// The single result of processing a reservation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OperationOutcome {
    /// The property was booked and the booking recorded.
    Success { confirmation: BookingConfirmation },

    /// No usable access credential; the guest must sign in again.
    CredentialUnavailable,

    /// The request broke one or more admission rules.
    ValidationFailed { reasons: Vec<String> },

    /// The request could not be completed.
    OperationFailed { message: String },

    /// The property was booked but the booking could not be recorded.
    BookedNotRecorded { confirmation: BookingConfirmation },
}

impl OperationOutcome {
    /// Returns true if the booking went through and was recorded.
    pub fn is_success(&self) -> bool {
        matches!(self, OperationOutcome::Success { .. })
    }

    /// Returns the confirmation if the third-party booking went through.
    pub fn confirmation(&self) -> Option<BookingConfirmation> {
        match self {
            OperationOutcome::Success { confirmation }
            | OperationOutcome::BookedNotRecorded { confirmation } => Some(*confirmation),
            _ => None,
        }
    }

    /// Returns a stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            OperationOutcome::Success { .. } => "success",
            OperationOutcome::CredentialUnavailable => "credential_unavailable",
            OperationOutcome::ValidationFailed { .. } => "validation_failed",
            OperationOutcome::OperationFailed { .. } => "operation_failed",
            OperationOutcome::BookedNotRecorded { .. } => "booked_not_recorded",
        }
    }

    /// Builds the outcome for a booking that could not be recorded.
    pub(crate) fn not_recorded(confirmation: BookingConfirmation, err: ServiceError) -> Self {
        tracing::error!(
            confirmation_id = %confirmation.confirmation_id,
            error = %err,
            "booking confirmed but not recorded"
        );
        OperationOutcome::BookedNotRecorded { confirmation }
    }
}

impl From<ServiceError> for OperationOutcome {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unauthorized => OperationOutcome::CredentialUnavailable,
            ServiceError::Declined(message) => OperationOutcome::OperationFailed { message },
            other => {
                tracing::error!(error = %other, "reservation request failed");
                OperationOutcome::OperationFailed {
                    message: GENERIC_FAILURE_MESSAGE.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ConfirmationId;

    #[test]
    fn test_unauthorized_maps_to_credential_unavailable() {
        let outcome = OperationOutcome::from(ServiceError::Unauthorized);
        assert_eq!(outcome, OperationOutcome::CredentialUnavailable);
    }

    #[test]
    fn test_declined_keeps_message() {
        let outcome = OperationOutcome::from(ServiceError::Declined("Property closed".into()));
        assert_eq!(
            outcome,
            OperationOutcome::OperationFailed {
                message: "Property closed".to_string()
            }
        );
    }

    #[test]
    fn test_unexpected_faults_do_not_leak_detail() {
        let faults = [
            ServiceError::ReservationSource("connection refused on 10.0.0.3".into()),
            ServiceError::CredentialProvider("token endpoint 500".into()),
            ServiceError::BookingService("timeout".into()),
            ServiceError::ReservationStore("disk full".into()),
        ];
        for fault in faults {
            assert_eq!(
                OperationOutcome::from(fault),
                OperationOutcome::OperationFailed {
                    message: GENERIC_FAILURE_MESSAGE.to_string()
                }
            );
        }
    }

    #[test]
    fn test_kind_labels() {
        let confirmation = BookingConfirmation::new(ConfirmationId::new(1));
        assert_eq!(OperationOutcome::Success { confirmation }.kind(), "success");
        assert_eq!(
            OperationOutcome::CredentialUnavailable.kind(),
            "credential_unavailable"
        );
        assert_eq!(
            OperationOutcome::ValidationFailed { reasons: vec![] }.kind(),
            "validation_failed"
        );
        assert_eq!(
            OperationOutcome::BookedNotRecorded { confirmation }.kind(),
            "booked_not_recorded"
        );
    }

    #[test]
    fn test_confirmation_accessor() {
        let confirmation = BookingConfirmation::new(ConfirmationId::new(3));
        assert_eq!(
            OperationOutcome::BookedNotRecorded { confirmation }.confirmation(),
            Some(confirmation)
        );
        assert_eq!(OperationOutcome::CredentialUnavailable.confirmation(), None);
    }

    #[test]
    fn test_serialization_is_tagged() {
        let outcome = OperationOutcome::ValidationFailed {
            reasons: vec!["Must be at least 7 days out".to_string()],
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "validation_failed");
        assert_eq!(json["reasons"][0], "Must be at least 7 days out");

        let json = serde_json::to_value(OperationOutcome::CredentialUnavailable).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "credential_unavailable" }));
    }
}
