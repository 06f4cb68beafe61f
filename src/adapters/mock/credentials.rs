//! In-memory credentials provider for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::auth::Credentials;
use crate::traits::{CredentialsError, CredentialsProvider};

/// Credentials held in memory, shareable across clones.
///
/// # Example
///
/// ```ignore
/// use judge_assistant::adapters::mock::InMemoryCredentials;
///
/// let provider = InMemoryCredentials::with_token("test-token");
/// let client = AssistantClient::new(config, http, Arc::new(provider.clone()));
/// // ... run a stream ...
/// assert_eq!(provider.load_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentials {
    credentials: Arc<Mutex<Option<Credentials>>>,
    load_should_fail: Arc<AtomicBool>,
    loads: Arc<AtomicUsize>,
}

impl InMemoryCredentials {
    /// Create an empty (signed-out) provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with initial credentials.
    pub fn with_credentials(creds: Credentials) -> Self {
        let provider = Self::new();
        provider.set_credentials(Some(creds));
        provider
    }

    /// Create a provider holding just an access token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::with_credentials(Credentials::with_token(token))
    }

    /// Configure whether load should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        self.load_should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of `load` calls so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Get the current credentials synchronously.
    pub fn get_credentials(&self) -> Option<Credentials> {
        self.slot().clone()
    }

    /// Set credentials synchronously.
    pub fn set_credentials(&self, creds: Option<Credentials>) {
        *self.slot() = creds;
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Credentials>> {
        self.credentials
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CredentialsProvider for InMemoryCredentials {
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.load_should_fail.load(Ordering::SeqCst) {
            return Err(CredentialsError::LoadFailed("Mock load failure".to_string()));
        }

        Ok(self.get_credentials())
    }

    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError> {
        self.set_credentials(Some(creds.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        self.set_credentials(None);
        Ok(())
    }
}
