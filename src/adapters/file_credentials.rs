//! File-based credentials provider adapter.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::auth::{Credentials, CredentialsManager};
use crate::traits::{CredentialsError, CredentialsProvider};

/// File-based credentials provider.
///
/// Wraps [`CredentialsManager`]; the blocking file I/O runs on tokio's
/// blocking pool so the stream driver's task never stalls on disk.
#[derive(Debug, Clone)]
pub struct FileCredentialsProvider {
    manager: CredentialsManager,
}

impl FileCredentialsProvider {
    /// Provider for the default `~/.judge/credentials.json`.
    pub fn new() -> Result<Self, CredentialsError> {
        CredentialsManager::new()
            .map(|manager| Self { manager })
            .ok_or_else(|| {
                CredentialsError::Other("Failed to determine home directory".to_string())
            })
    }

    /// Provider for an explicit file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            manager: CredentialsManager::with_path(path),
        }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &std::path::Path {
        self.manager.credentials_path()
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T, std::io::Error>
    where
        T: Send + 'static,
        F: FnOnce(CredentialsManager) -> std::io::Result<T> + Send + 'static,
    {
        let manager = self.manager.clone();
        tokio::task::spawn_blocking(move || op(manager))
            .await
            .map_err(std::io::Error::other)?
    }
}

#[async_trait]
impl CredentialsProvider for FileCredentialsProvider {
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        self.run_blocking(|manager| manager.load())
            .await
            .map_err(|e| CredentialsError::LoadFailed(e.to_string()))
    }

    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError> {
        let creds = creds.clone();
        self.run_blocking(move |manager| manager.save(&creds))
            .await
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        self.run_blocking(|manager| manager.clear())
            .await
            .map_err(|e| CredentialsError::ClearFailed(e.to_string()))
    }
}
