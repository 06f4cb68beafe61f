//! Mock HTTP client for testing.
//!
//! Returns scripted chunk sequences or errors and records every request so
//! tests can assert on what was (or was not) sent.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: String,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Deliver these chunks, then end the body
    Stream(Vec<Bytes>),
    /// Deliver these chunks, then keep the connection open forever
    OpenStream(Vec<Bytes>),
    /// Deliver these chunks, then fail the read
    StreamError(Vec<Bytes>, HttpError),
    /// Fail the request before any body is returned
    Error(HttpError),
}

impl MockResponse {
    /// Convenience for a stream of text chunks.
    pub fn text_chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockResponse::Stream(
            chunks
                .into_iter()
                .map(|chunk| Bytes::from(chunk.into()))
                .collect(),
        )
    }
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use judge_assistant::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_default_response(MockResponse::text_chunks([
///     "event:message\ndata:{\"content\":\"Hi\"}\n\n",
///     "data:{\"done\":true}\n\n",
/// ]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Configured responses by URL prefix
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Response when no URL matches
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a URL (exact match, then prefix match).
    pub fn set_response(&self, url: &str, response: MockResponse) {
        lock(&self.responses).insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = lock(&self.responses);

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        for (pattern, response) in responses.iter() {
            if url.starts_with(pattern) {
                return Some(response.clone());
            }
        }

        lock(&self.default_response).clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        lock(&self.requests).push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
        });

        match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => Ok(Box::pin(stream::iter(
                chunks.into_iter().map(Ok::<_, HttpError>),
            ))),
            Some(MockResponse::OpenStream(chunks)) => Ok(Box::pin(
                stream::iter(chunks.into_iter().map(Ok::<_, HttpError>)).chain(stream::pending()),
            )),
            Some(MockResponse::StreamError(chunks, err)) => Ok(Box::pin(
                stream::iter(chunks.into_iter().map(Ok::<_, HttpError>))
                    .chain(stream::once(async move { Err(err) })),
            )),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}
