//! Values exchanged with the booking service.

use chrono::{DateTime, Utc};
use common::ConfirmationId;
use serde::{Deserialize, Serialize};

/// Token required to call the third-party booking service.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessCredential {
    token: String,
    expires_at: DateTime<Utc>,
}

impl AccessCredential {
    /// Creates a credential valid until `expires_at`.
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true if the credential must not be used at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

// Keep tokens out of logs.
impl std::fmt::Debug for AccessCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessCredential")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Proof that the booking service accepted a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// Confirmation number issued by the booking service.
    pub confirmation_id: ConfirmationId,
}

impl BookingConfirmation {
    pub fn new(confirmation_id: ConfirmationId) -> Self {
        Self { confirmation_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_credential_expiry_boundary() {
        let now = Utc::now();
        let credential = AccessCredential::new("tok", now + Duration::minutes(5));
        assert!(!credential.is_expired_at(now));
        assert!(credential.is_expired_at(now + Duration::minutes(5)));
        assert!(credential.is_expired_at(now + Duration::minutes(6)));
    }

    #[test]
    fn test_credential_debug_redacts_token() {
        let credential = AccessCredential::new("secret-token", Utc::now());
        let debug = format!("{credential:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_confirmation_serialization() {
        let confirmation = BookingConfirmation::new(ConfirmationId::new(7));
        let json = serde_json::to_string(&confirmation).unwrap();
        assert_eq!(json, r#"{"confirmation_id":7}"#);
    }
}
