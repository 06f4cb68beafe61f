//! Credentials storage and management.
//!
//! Credentials live in `~/.judge/credentials.json` unless a different path
//! is configured.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// The credentials directory name.
const CREDENTIALS_DIR: &str = ".judge";

/// The credentials file name.
const CREDENTIALS_FILE: &str = "credentials.json";

/// Authentication credentials for the judge platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    /// Bearer token sent with API requests.
    pub access_token: Option<String>,
    /// Token for obtaining a new access token.
    pub refresh_token: Option<String>,
    /// Token expiration time as Unix timestamp (seconds since epoch).
    pub expires_at: Option<i64>,
    /// The authenticated user's ID.
    pub user_id: Option<String>,
}

impl Credentials {
    /// Create new empty credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credentials holding just a bearer token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Default::default()
        }
    }

    /// The access token, if present and non-empty.
    pub fn bearer_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Check if the credentials have a usable access token.
    pub fn has_token(&self) -> bool {
        self.bearer_token().is_some()
    }
}

/// Manages credential storage and retrieval.
#[derive(Debug, Clone)]
pub struct CredentialsManager {
    /// Path to the credentials file.
    credentials_path: PathBuf,
}

impl CredentialsManager {
    /// Create a manager for the default location under the home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self::with_path(home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE)))
    }

    /// Create a manager for an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: path.into(),
        }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Load credentials from the credentials file.
    ///
    /// A missing file is not an error and yields `Ok(None)`.
    pub fn load(&self) -> std::io::Result<Option<Credentials>> {
        let file = match File::open(&self.credentials_path) {
            Ok(f) => f,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };

        let creds = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(creds))
    }

    /// Save credentials to the credentials file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self, credentials: &Credentials) -> std::io::Result<()> {
        if let Some(parent) = self.credentials_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&self.credentials_path)?);
        serde_json::to_writer_pretty(&mut writer, credentials)?;
        writer.flush()
    }

    /// Remove the credentials file. Succeeds if it didn't exist.
    pub fn clear(&self) -> std::io::Result<()> {
        match fs::remove_file(&self.credentials_path) {
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
