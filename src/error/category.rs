//! Error category classification.
//!
//! Categories let callers decide whether re-invoking the stream makes sense;
//! the crate itself never retries.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout, or a body read cut short.
    /// Generally transient and retryable.
    Network,

    /// Missing or rejected credentials.
    /// Requires the user to sign in again.
    Auth,

    /// Server rejected the request or reported an error in the stream.
    /// 5xx responses are worth retrying later.
    Server,

    /// Bugs on our side (e.g. a request that cannot be encoded).
    /// Not retryable.
    Client,

    /// Local credential storage problems.
    System,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::System => "system",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
