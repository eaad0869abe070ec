//! Credential provider trait and in-memory implementation.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use domain::AccessCredential;

use crate::error::ServiceError;

/// Supplies the access credential needed by the booking service.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the caller's credential, or `None` if the caller is not signed in.
    async fn access_credential(&self) -> Result<Option<AccessCredential>, ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryCredentialState {
    credential: Option<AccessCredential>,
    fetch_count: usize,
    fail_on_fetch: bool,
}

/// In-memory credential provider for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialProvider {
    state: Arc<RwLock<InMemoryCredentialState>>,
}

impl InMemoryCredentialProvider {
    /// Creates a provider with no signed-in caller.
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Creates a provider that hands out the given credential.
    pub fn signed_in(credential: AccessCredential) -> Self {
        let provider = Self::default();
        provider.sign_in(credential);
        provider
    }

    pub fn sign_in(&self, credential: AccessCredential) {
        self.write().credential = Some(credential);
    }

    pub fn sign_out(&self) {
        self.write().credential = None;
    }

    /// Configures the provider to fail on the next fetch.
    pub fn set_fail_on_fetch(&self, fail: bool) {
        self.write().fail_on_fetch = fail;
    }

    /// Returns how many times a credential was requested.
    pub fn fetch_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .fetch_count
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, InMemoryCredentialState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CredentialProvider for InMemoryCredentialProvider {
    async fn access_credential(&self) -> Result<Option<AccessCredential>, ServiceError> {
        let mut state = self.write();
        state.fetch_count += 1;

        if state.fail_on_fetch {
            return Err(ServiceError::CredentialProvider(
                "Identity provider unavailable".to_string(),
            ));
        }

        Ok(state.credential.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_signed_out_returns_none() {
        let provider = InMemoryCredentialProvider::signed_out();
        assert_eq!(provider.access_credential().await.unwrap(), None);
        assert_eq!(provider.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let credential = AccessCredential::new("tok", Utc::now() + Duration::hours(1));
        let provider = InMemoryCredentialProvider::signed_in(credential.clone());
        assert_eq!(provider.access_credential().await.unwrap(), Some(credential));

        provider.sign_out();
        assert_eq!(provider.access_credential().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fail_on_fetch() {
        let provider = InMemoryCredentialProvider::signed_out();
        provider.set_fail_on_fetch(true);

        let result = provider.access_credential().await;
        assert!(matches!(result, Err(ServiceError::CredentialProvider(_))));
    }
}
