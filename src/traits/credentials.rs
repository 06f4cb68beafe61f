//! Credentials provider trait abstraction.
//!
//! The assistant stream needs a bearer token immediately before each
//! request. Where that token lives (a file, memory in tests) is behind
//! [`CredentialsProvider`].

use async_trait::async_trait;

use crate::auth::Credentials;

/// Credentials operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    /// Failed to load credentials
    LoadFailed(String),
    /// Failed to save credentials
    SaveFailed(String),
    /// Failed to clear credentials
    ClearFailed(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialsError::LoadFailed(msg) => write!(f, "Failed to load credentials: {}", msg),
            CredentialsError::SaveFailed(msg) => write!(f, "Failed to save credentials: {}", msg),
            CredentialsError::ClearFailed(msg) => {
                write!(f, "Failed to clear credentials: {}", msg)
            }
            CredentialsError::Other(msg) => write!(f, "Credentials error: {}", msg),
        }
    }
}

impl std::error::Error for CredentialsError {}

/// Trait for credentials storage and retrieval.
///
/// # Example
///
/// ```ignore
/// use judge_assistant::traits::CredentialsProvider;
///
/// async fn bearer<P: CredentialsProvider>(provider: &P) -> Option<String> {
///     provider.load().await.ok().flatten().and_then(|c| c.access_token)
/// }
/// ```
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Load credentials from storage.
    ///
    /// # Returns
    /// - `Ok(Some(credentials))` if credentials exist and were loaded successfully
    /// - `Ok(None)` if no credentials are stored
    /// - `Err(error)` if loading failed
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError>;

    /// Save credentials to storage.
    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError>;

    /// Clear all stored credentials.
    async fn clear(&self) -> Result<(), CredentialsError>;
}
