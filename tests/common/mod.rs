//! Common test utilities for integration tests.
//!
//! Fixtures for credentials, SSE bodies and a callback recorder shared by
//! the integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use judge_assistant::adapters::{FileCredentialsProvider, ReqwestHttpClient};
use judge_assistant::auth::{Credentials, CredentialsManager};
use judge_assistant::callbacks::StreamCallbacks;
use judge_assistant::client::AssistantClient;
use judge_assistant::config::AssistConfig;

/// Token written by [`test_credentials`].
pub const TEST_TOKEN: &str = "test-access-token-12345";

/// Creates test credentials for use in tests.
///
/// Returns credentials with test tokens that won't expire during test execution.
pub fn test_credentials() -> Credentials {
    Credentials {
        access_token: Some(TEST_TOKEN.to_string()),
        refresh_token: Some("test-refresh-token-67890".to_string()),
        expires_at: Some(i64::MAX), // Never expires in tests
        user_id: Some("test-user-id".to_string()),
    }
}

/// Write credentials to `path` the way the platform login does.
pub fn write_credentials(path: &Path, credentials: &Credentials) {
    CredentialsManager::with_path(path)
        .save(credentials)
        .expect("Failed to write test credentials");
}

/// One `event:message` frame carrying `json`.
pub fn message_frame(json: &str) -> String {
    format!("event:message\ndata:{}\n\n", json)
}

/// Client against `base_url` using the real reqwest transport and a
/// credentials file at `credentials_path`.
pub fn reqwest_client(base_url: &str, credentials_path: &Path) -> AssistantClient {
    let config = AssistConfig::default()
        .with_base_url(base_url)
        .with_credentials_path(credentials_path);
    AssistantClient::new(
        config,
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(FileCredentialsProvider::with_path(credentials_path)),
    )
}

/// A single callback invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Chunk(String),
    Error(String),
    Complete,
    Incomplete(String),
}

/// Records every callback in order.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
}

impl Recorder {
    pub fn chunks(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Chunk(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn terminal_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Error(_) | Call::Complete))
            .count()
    }
}

impl StreamCallbacks for Recorder {
    fn on_chunk(&mut self, text: &str) {
        self.calls.push(Call::Chunk(text.to_string()));
    }

    fn on_error(&mut self, message: &str) {
        self.calls.push(Call::Error(message.to_string()));
    }

    fn on_complete(&mut self) {
        self.calls.push(Call::Complete);
    }

    fn on_incomplete(&mut self, partial: &str) {
        self.calls.push(Call::Incomplete(partial.to_string()));
    }
}
