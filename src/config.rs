//! Client configuration.
//!
//! Built with the builder methods below or read from the environment:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `JUDGE_API_URL` | `http://localhost:8080` |
//! | `JUDGE_ASSIST_STREAM_PATH` | `/api/ai/chat/stream` |
//! | `JUDGE_CONNECT_TIMEOUT_SECS` | `10` |
//! | `JUDGE_CREDENTIALS_PATH` | `~/.judge/credentials.json` |

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_STREAM_PATH: &str = "/api/ai/chat/stream";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`AssistantClient`](crate::client::AssistantClient).
///
/// # Example
///
/// ```
/// use judge_assistant::config::AssistConfig;
///
/// let config = AssistConfig::default()
///     .with_base_url("https://judge.example.com/")
///     .with_stream_path("ai/stream");
///
/// assert_eq!(config.stream_url(), "https://judge.example.com/ai/stream");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistConfig {
    /// Scheme and host of the judge API
    pub base_url: String,
    /// Path of the streaming chat endpoint
    pub stream_path: String,
    /// Upper bound on connection setup; the body itself is not time-limited
    pub connect_timeout_secs: u64,
    /// Credentials file override
    pub credentials_path: Option<PathBuf>,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            stream_path: DEFAULT_STREAM_PATH.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            credentials_path: None,
        }
    }
}

impl AssistConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_stream_path(mut self, path: impl Into<String>) -> Self {
        self.stream_path = path.into();
        self
    }

    pub fn with_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Read configuration from `JUDGE_*` environment variables.
    ///
    /// Unset or empty variables keep their defaults; an unparseable timeout
    /// is logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = env_value("JUDGE_API_URL") {
            config.base_url = url;
        }
        if let Some(path) = env_value("JUDGE_ASSIST_STREAM_PATH") {
            config.stream_path = path;
        }
        if let Some(raw) = env_value("JUDGE_CONNECT_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.connect_timeout_secs = secs,
                _ => warn!(value = %raw, "Ignoring invalid JUDGE_CONNECT_TIMEOUT_SECS"),
            }
        }
        if let Some(path) = env_value("JUDGE_CREDENTIALS_PATH") {
            config.credentials_path = Some(PathBuf::from(path));
        }

        config
    }

    /// Full URL of the streaming endpoint.
    pub fn stream_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.stream_path.trim_start_matches('/')
        )
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
