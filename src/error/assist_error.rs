//! Unified error type for assistant streams.

use thiserror::Error;

use super::category::ErrorCategory;
use super::response::error_message_from_body;
use crate::traits::{CredentialsError, HttpError};

/// Message shown when no bearer token is available.
pub const NOT_AUTHENTICATED_MESSAGE: &str =
    "You are not signed in. Please log in to use the AI assistant.";

/// Fallback when a failure carries no usable message.
pub const GENERIC_STREAM_ERROR: &str = "The AI assistant stream failed unexpectedly.";

/// Every way a stream can fail before or while it runs.
///
/// Each variant reaches the consumer as exactly one `on_error` call with
/// [`user_message`](Self::user_message).
#[derive(Debug, Error)]
pub enum AssistError {
    /// No bearer token in the credential store.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The credential store itself failed.
    #[error("credential store error: {0}")]
    Credentials(#[from] CredentialsError),

    /// Non-success response; `message` is already resolved from the body.
    #[error("request rejected with status {status}: {message}")]
    Http { status: u16, message: String },

    /// Connection or body-read failure.
    #[error("transport error: {0}")]
    Transport(HttpError),

    /// `error` field delivered inside the stream.
    #[error("assistant reported an error: {0}")]
    Protocol(String),

    /// The request body could not be encoded.
    #[error("failed to encode request: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<HttpError> for AssistError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ServerError {
                status,
                status_text,
                body,
            } => AssistError::Http {
                status,
                message: error_message_from_body(status, &status_text, &body),
            },
            other => AssistError::Transport(other),
        }
    }
}

impl AssistError {
    /// The single string handed to the consumer's error callback.
    pub fn user_message(&self) -> String {
        let message = match self {
            AssistError::NotAuthenticated => NOT_AUTHENTICATED_MESSAGE.to_string(),
            AssistError::Http { message, .. } => message.clone(),
            AssistError::Protocol(message) => message.clone(),
            AssistError::Transport(err) => err.to_string(),
            AssistError::Credentials(err) => err.to_string(),
            AssistError::Json(err) => format!("Failed to encode request: {}", err),
        };

        if message.trim().is_empty() {
            GENERIC_STREAM_ERROR.to_string()
        } else {
            message
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AssistError::NotAuthenticated => ErrorCategory::Auth,
            AssistError::Credentials(_) => ErrorCategory::System,
            AssistError::Http { status, .. } if *status == 401 || *status == 403 => {
                ErrorCategory::Auth
            }
            AssistError::Http { status, .. } if *status >= 500 => ErrorCategory::Server,
            AssistError::Http { status, .. } if *status == 429 => ErrorCategory::Server,
            AssistError::Http { .. } => ErrorCategory::Client,
            AssistError::Transport(_) => ErrorCategory::Network,
            AssistError::Protocol(_) => ErrorCategory::Server,
            AssistError::Json(_) => ErrorCategory::Client,
        }
    }

    /// Whether re-invoking the stream could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AssistError::NotAuthenticated => "E_AUTH_MISSING",
            AssistError::Credentials(_) => "E_AUTH_STORE",
            AssistError::Http { .. } => "E_HTTP_STATUS",
            AssistError::Transport(HttpError::Timeout(_)) => "E_NET_TIMEOUT",
            AssistError::Transport(HttpError::ConnectionFailed(_)) => "E_NET_CONN",
            AssistError::Transport(_) => "E_NET_OTHER",
            AssistError::Protocol(_) => "E_STREAM_ERROR",
            AssistError::Json(_) => "E_REQUEST_ENCODE",
        }
    }
}
