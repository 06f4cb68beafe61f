//! Assistant client: authorizes, opens the stream and drives the decoder.
//!
//! Two ways to consume a stream:
//!
//! - [`AssistantClient::stream_chat`] pushes into [`StreamCallbacks`]
//! - [`AssistantClient::stream_events`] returns a lazy `Stream` of
//!   [`StreamEvent`]s that ends after the first `Error` or `Done`
//!
//! Both share one driver, so ordering, termination and cancellation behave
//! identically.

use std::collections::VecDeque;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::adapters::{FileCredentialsProvider, ReqwestHttpClient};
use crate::auth::Credentials;
use crate::callbacks::StreamCallbacks;
use crate::cancel::CancelToken;
use crate::config::AssistConfig;
use crate::error::{AssistError, AssistResult};
use crate::models::ChatRequest;
use crate::sse::{StreamDecoder, StreamEvent};
use crate::traits::{ByteStream, CredentialsProvider, Headers, HttpClient};

/// Lazily evaluated event stream returned by [`AssistantClient::stream_events`].
pub type EventStream = Pin<Box<dyn Stream<Item = StreamEvent> + Send>>;

/// Where a stream driver currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    NotStarted,
    /// Looking up the bearer token
    Authorizing,
    /// Request sent, waiting for the response head
    Requesting,
    /// Reading and decoding the body
    Streaming,
    /// A terminal outcome was delivered or the stream was cancelled
    Terminated,
}

impl DriverPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverPhase::NotStarted => "not_started",
            DriverPhase::Authorizing => "authorizing",
            DriverPhase::Requesting => "requesting",
            DriverPhase::Streaming => "streaming",
            DriverPhase::Terminated => "terminated",
        }
    }
}

impl fmt::Display for DriverPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a [`stream_chat`](AssistantClient::stream_chat) call ended.
#[derive(Debug)]
pub enum StreamOutcome {
    /// `on_complete` was called.
    Completed,
    /// `on_error` was called with this error's user message.
    Failed(AssistError),
    /// The token fired; no terminal callback was made.
    Cancelled,
}

impl StreamOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, StreamOutcome::Completed)
    }
}

/// Client for the judge's streaming AI assistant endpoint.
///
/// Cheap to clone; clones share the HTTP client and credential store.
///
/// # Example
///
/// ```ignore
/// use judge_assistant::prelude::*;
///
/// let client = AssistantClient::from_config(AssistConfig::from_env())?;
/// let cancel = CancelToken::new();
/// let callbacks = FnCallbacks::new(
///     |text: &str| print!("{}", text),
///     |message: &str| eprintln!("{}", message),
///     || println!(),
/// );
/// client.stream_chat(&ChatRequest::new("Why TLE?"), callbacks, &cancel).await;
/// ```
#[derive(Clone)]
pub struct AssistantClient {
    config: AssistConfig,
    http: Arc<dyn HttpClient>,
    credentials: Arc<dyn CredentialsProvider>,
}

impl fmt::Debug for AssistantClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AssistantClient {
    pub fn new(
        config: AssistConfig,
        http: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialsProvider>,
    ) -> Self {
        Self {
            config,
            http,
            credentials,
        }
    }

    /// Build a client with the reqwest transport and file-backed credentials.
    pub fn from_config(config: AssistConfig) -> AssistResult<Self> {
        let http = ReqwestHttpClient::with_connect_timeout(config.connect_timeout())?;
        let credentials = match &config.credentials_path {
            Some(path) => FileCredentialsProvider::with_path(path),
            None => FileCredentialsProvider::new()?,
        };

        Ok(Self::new(config, Arc::new(http), Arc::new(credentials)))
    }

    pub fn config(&self) -> &AssistConfig {
        &self.config
    }

    /// Run one assistant stream to completion, pushing into `callbacks`.
    ///
    /// Chunks arrive in wire order, followed by exactly one `on_error` or
    /// `on_complete`. When `cancel` fires, the driver stops at the next
    /// check and makes no further callback at all.
    pub async fn stream_chat<C>(
        &self,
        request: &ChatRequest,
        mut callbacks: C,
        cancel: &CancelToken,
    ) -> StreamOutcome
    where
        C: StreamCallbacks,
    {
        let mut driver = StreamDriver::new(self.clone(), request.clone(), cancel.clone());
        let mut chunks = 0usize;

        while let Some(step) = driver.next_step().await {
            if cancel.is_cancelled() {
                break;
            }

            match step {
                Ok(Step::Chunk(text)) => {
                    chunks += 1;
                    callbacks.on_chunk(&text);
                }
                Ok(Step::Incomplete(partial)) => callbacks.on_incomplete(&partial),
                Ok(Step::Done) => {
                    info!(chunks, "Assistant stream completed");
                    callbacks.on_complete();
                    return StreamOutcome::Completed;
                }
                Err(err) => {
                    warn!(code = err.error_code(), error = %err, chunks, "Assistant stream failed");
                    callbacks.on_error(&err.user_message());
                    return StreamOutcome::Failed(err);
                }
            }
        }

        info!(chunks, "Assistant stream cancelled");
        StreamOutcome::Cancelled
    }

    /// Lazy alternative to [`stream_chat`](Self::stream_chat).
    ///
    /// Nothing happens until the stream is first polled. Failures surface as
    /// a final [`StreamEvent::Error`] carrying the user-facing message.
    /// Cancellation ends the stream without a terminal event.
    pub fn stream_events(&self, request: ChatRequest, cancel: CancelToken) -> EventStream {
        let driver = StreamDriver::new(self.clone(), request, cancel);

        Box::pin(stream::unfold(driver, |mut driver| async move {
            let event = match driver.next_step().await? {
                Ok(step) => StreamEvent::from(step),
                Err(err) => StreamEvent::Error(err.user_message()),
            };
            Some((event, driver))
        }))
    }

    /// Run [`stream_chat`](Self::stream_chat) on a spawned task.
    pub fn spawn_chat<C>(
        &self,
        request: ChatRequest,
        callbacks: C,
        cancel: CancelToken,
    ) -> JoinHandle<StreamOutcome>
    where
        C: StreamCallbacks + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move { client.stream_chat(&request, callbacks, &cancel).await })
    }

    /// Authorize and send the request; returns the success body.
    async fn open(&self, request: &ChatRequest) -> AssistResult<ByteStream> {
        debug!(phase = %DriverPhase::Authorizing, "Loading credentials");
        let credentials = self.credentials.load().await?;
        let token = credentials
            .as_ref()
            .and_then(Credentials::bearer_token)
            .ok_or(AssistError::NotAuthenticated)?;

        let body = serde_json::to_string(request)?;
        let headers = request_headers(token);
        let url = self.config.stream_url();

        debug!(phase = %DriverPhase::Requesting, %url, "Sending assistant request");
        let stream = self.http.post_stream(&url, &body, &headers).await?;
        Ok(stream)
    }
}

fn request_headers(token: &str) -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Accept".to_string(), "text/event-stream".to_string());
    headers.insert("Authorization".to_string(), format!("Bearer {}", token));
    headers
}

/// Non-failing driver output; failures travel as `Err(AssistError)`.
enum Step {
    Chunk(String),
    Incomplete(String),
    Done,
}

impl From<Step> for StreamEvent {
    fn from(step: Step) -> Self {
        match step {
            Step::Chunk(text) => StreamEvent::Content(text),
            Step::Incomplete(partial) => StreamEvent::Incomplete(partial),
            Step::Done => StreamEvent::Done,
        }
    }
}

enum Phase {
    NotStarted,
    Streaming {
        body: ByteStream,
        decoder: StreamDecoder,
    },
    Terminated,
}

/// Pull-based driver shared by the callback and stream interfaces.
///
/// Yields decoded steps in order; an `error` payload or any failure is
/// yielded as `Err` and ends the driver. Returns `None` once terminated or
/// cancelled.
struct StreamDriver {
    client: AssistantClient,
    request: ChatRequest,
    cancel: CancelToken,
    phase: Phase,
    queued: VecDeque<StreamEvent>,
}

impl StreamDriver {
    fn new(client: AssistantClient, request: ChatRequest, cancel: CancelToken) -> Self {
        Self {
            client,
            request,
            cancel,
            phase: Phase::NotStarted,
            queued: VecDeque::new(),
        }
    }

    fn phase(&self) -> DriverPhase {
        match self.phase {
            Phase::NotStarted => DriverPhase::NotStarted,
            Phase::Streaming { .. } => DriverPhase::Streaming,
            Phase::Terminated => DriverPhase::Terminated,
        }
    }

    fn terminate(&mut self) {
        if self.phase() != DriverPhase::Terminated {
            debug!(from = %self.phase(), "Stream driver terminated");
        }
        // Dropping the body closes the connection
        self.phase = Phase::Terminated;
        self.queued.clear();
    }

    async fn next_step(&mut self) -> Option<AssistResult<Step>> {
        loop {
            if self.cancel.is_cancelled() {
                self.terminate();
                return None;
            }

            if let Some(event) = self.queued.pop_front() {
                return Some(match event {
                    StreamEvent::Content(text) => Ok(Step::Chunk(text)),
                    StreamEvent::Incomplete(partial) => Ok(Step::Incomplete(partial)),
                    StreamEvent::Done => {
                        self.terminate();
                        Ok(Step::Done)
                    }
                    StreamEvent::Error(message) => {
                        self.terminate();
                        Err(AssistError::Protocol(message))
                    }
                });
            }

            match &mut self.phase {
                Phase::Terminated => return None,
                Phase::NotStarted => {
                    let opened = tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => continue,
                        opened = self.client.open(&self.request) => opened,
                    };

                    match opened {
                        Ok(body) => {
                            debug!(phase = %DriverPhase::Streaming, "Assistant stream opened");
                            self.phase = Phase::Streaming {
                                body,
                                decoder: StreamDecoder::new(),
                            };
                        }
                        Err(err) => {
                            self.terminate();
                            return Some(Err(err));
                        }
                    }
                }
                Phase::Streaming { body, decoder } => {
                    let read = tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => continue,
                        read = body.next() => read,
                    };

                    match read {
                        Some(Ok(chunk)) => self.queued.extend(decoder.feed(&chunk)),
                        Some(Err(err)) => {
                            self.terminate();
                            return Some(Err(err.into()));
                        }
                        None => {
                            debug!(state = ?decoder.frame_state(), "Assistant stream body ended");
                            self.queued.extend(decoder.finish());
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryCredentials, MockHttpClient, MockResponse};
    use crate::error::NOT_AUTHENTICATED_MESSAGE;
    use crate::traits::HttpError;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Chunk(String),
        Error(String),
        Complete,
        Incomplete(String),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
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

    fn chunk(text: &str) -> Call {
        Call::Chunk(text.to_string())
    }

    fn client_with(http: &MockHttpClient, creds: InMemoryCredentials) -> AssistantClient {
        AssistantClient::new(
            AssistConfig::default().with_base_url("http://judge.test"),
            Arc::new(http.clone()),
            Arc::new(creds),
        )
    }

    async fn run(http: &MockHttpClient, creds: InMemoryCredentials) -> (Vec<Call>, StreamOutcome) {
        let client = client_with(http, creds);
        let mut recorder = Recorder::default();
        let outcome = client
            .stream_chat(&ChatRequest::new("Why TLE?"), &mut recorder, &CancelToken::new())
            .await;
        (recorder.calls, outcome)
    }

    #[tokio::test]
    async fn test_happy_path_in_order() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::text_chunks([
            "event:message\ndata:{\"content\":\"Hello\"}\n\n",
            "event:message\ndata:{\"content\":\" world\"}\n\n",
            "event:message\ndata:{\"done\":true}\n\n",
        ]));

        let (calls, outcome) = run(&http, InMemoryCredentials::with_token("tok")).await;

        assert_eq!(calls, vec![chunk("Hello"), chunk(" world"), Call::Complete]);
        assert!(outcome.is_completed());
    }

    #[tokio::test]
    async fn test_request_headers_and_body() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::text_chunks(["data:{\"done\":true}\n\n"]));

        let client = client_with(&http, InMemoryCredentials::with_token("abc123"));
        let request = ChatRequest::new("hint please").with_problem_id("42");
        client
            .stream_chat(&request, Recorder::default(), &CancelToken::new())
            .await;

        let requests = http.get_requests();
        assert_eq!(requests.len(), 1);
        let sent = &requests[0];
        assert_eq!(sent.url, "http://judge.test/api/ai/chat/stream");
        assert_eq!(sent.headers.get("Authorization").unwrap(), "Bearer abc123");
        assert_eq!(sent.headers.get("Accept").unwrap(), "text/event-stream");
        assert_eq!(sent.headers.get("Content-Type").unwrap(), "application/json");

        let body: serde_json::Value = serde_json::from_str(&sent.body).unwrap();
        assert_eq!(body["message"], "hint please");
        assert_eq!(body["problemId"], "42");
    }

    #[tokio::test]
    async fn test_missing_token_makes_no_request() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::text_chunks(["data:{\"content\":\"x\"}\n\n"]));

        let (calls, outcome) = run(&http, InMemoryCredentials::new()).await;

        assert_eq!(calls, vec![Call::Error(NOT_AUTHENTICATED_MESSAGE.to_string())]);
        assert!(matches!(outcome, StreamOutcome::Failed(AssistError::NotAuthenticated)));
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_blank_token_counts_as_missing() {
        let http = MockHttpClient::new();
        let (calls, _) = run(&http, InMemoryCredentials::with_token("   ")).await;

        assert_eq!(calls, vec![Call::Error(NOT_AUTHENTICATED_MESSAGE.to_string())]);
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_credential_store_failure_reports_error() {
        let http = MockHttpClient::new();
        let creds = InMemoryCredentials::with_token("tok");
        creds.set_load_should_fail(true);

        let (calls, outcome) = run(&http, creds).await;

        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], Call::Error(_)));
        assert!(matches!(outcome, StreamOutcome::Failed(AssistError::Credentials(_))));
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_uses_body_message() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Error(HttpError::ServerError {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: r#"{"message":"Server busy"}"#.to_string(),
        }));

        let (calls, outcome) = run(&http, InMemoryCredentials::with_token("tok")).await;

        assert_eq!(calls, vec![Call::Error("Server busy".to_string())]);
        assert!(matches!(outcome, StreamOutcome::Failed(AssistError::Http { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_server_error_with_empty_body_uses_status_line() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Error(HttpError::ServerError {
            status: 503,
            status_text: "Service Unavailable".to_string(),
            body: String::new(),
        }));

        let (calls, _) = run(&http, InMemoryCredentials::with_token("tok")).await;

        assert_eq!(calls, vec![Call::Error("HTTP 503: Service Unavailable".to_string())]);
    }

    #[tokio::test]
    async fn test_error_frame_stops_processing() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::text_chunks([
            "event:message\ndata:{\"content\":\"Partial\"}\n\n",
            "event:message\ndata:{\"error\":\"Rate limited\"}\n\n",
            "event:message\ndata:{\"content\":\"ignored\"}\n\n",
        ]));

        let (calls, outcome) = run(&http, InMemoryCredentials::with_token("tok")).await;

        assert_eq!(
            calls,
            vec![chunk("Partial"), Call::Error("Rate limited".to_string())]
        );
        assert!(matches!(outcome, StreamOutcome::Failed(AssistError::Protocol(_))));
    }

    #[tokio::test]
    async fn test_end_of_stream_without_done_completes() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::text_chunks([
            "event:message\ndata:{\"content\":\"only\"}\n\n",
        ]));

        let (calls, _) = run(&http, InMemoryCredentials::with_token("tok")).await;

        assert_eq!(calls, vec![chunk("only"), Call::Complete]);
    }

    #[tokio::test]
    async fn test_unparsed_tail_reports_incomplete_then_complete() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::text_chunks([
            "event:message\ndata:{\"content\":\"ok\"}\n\n",
            "event:message\ndata:{\"content\":\"trunc",
        ]));

        let (calls, outcome) = run(&http, InMemoryCredentials::with_token("tok")).await;

        assert_eq!(
            calls,
            vec![
                chunk("ok"),
                Call::Incomplete("{\"content\":\"trunc".to_string()),
                Call::Complete
            ]
        );
        assert!(outcome.is_completed());
    }

    #[tokio::test]
    async fn test_transport_error_mid_stream() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::StreamError(
            vec![bytes::Bytes::from("event:message\ndata:{\"content\":\"a\"}\n\n")],
            HttpError::Io("connection reset".to_string()),
        ));

        let (calls, outcome) = run(&http, InMemoryCredentials::with_token("tok")).await;

        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], chunk("a"));
        assert!(matches!(&calls[1], Call::Error(message) if message.contains("connection reset")));
        assert!(matches!(outcome, StreamOutcome::Failed(AssistError::Transport(_))));
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));

        let (calls, outcome) = run(&http, InMemoryCredentials::with_token("tok")).await;

        assert_eq!(calls.len(), 1);
        assert!(matches!(&calls[0], Call::Error(message) if message.contains("refused")));
        assert!(outcome_is_retryable(&outcome));
    }

    fn outcome_is_retryable(outcome: &StreamOutcome) -> bool {
        matches!(outcome, StreamOutcome::Failed(err) if err.is_retryable())
    }

    #[tokio::test]
    async fn test_cancel_before_start_makes_no_calls() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::text_chunks(["data:{\"content\":\"x\"}\n\n"]));
        let client = client_with(&http, InMemoryCredentials::with_token("tok"));

        let cancel = CancelToken::new();
        cancel.cancel();
        let mut recorder = Recorder::default();
        let outcome = client
            .stream_chat(&ChatRequest::new("q"), &mut recorder, &cancel)
            .await;

        assert!(matches!(outcome, StreamOutcome::Cancelled));
        assert!(recorder.calls.is_empty());
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_while_waiting_for_data() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::OpenStream(vec![bytes::Bytes::from(
            "event:message\ndata:{\"content\":\"first\"}\n\n",
        )]));
        let client = client_with(&http, InMemoryCredentials::with_token("tok"));

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let callbacks = crate::callbacks::FnCallbacks::new(
            {
                let tx = tx.clone();
                move |text: &str| {
                    let _ = tx.send(Call::Chunk(text.to_string()));
                }
            },
            {
                let tx = tx.clone();
                move |message: &str| {
                    let _ = tx.send(Call::Error(message.to_string()));
                }
            },
            move || {
                let _ = tx.send(Call::Complete);
            },
        );

        let cancel = CancelToken::new();
        let handle = client.spawn_chat(ChatRequest::new("q"), callbacks, cancel.clone());

        assert_eq!(rx.recv().await, Some(chunk("first")));
        cancel.cancel();

        let outcome = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("driver should stop after cancel")
            .unwrap();
        assert!(matches!(outcome, StreamOutcome::Cancelled));
        // Every sender has been dropped with the callbacks; nothing else was sent
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_cancel_from_callback_drops_queued_events() {
        struct CancelOnFirstChunk {
            cancel: CancelToken,
            calls: Vec<Call>,
        }

        impl StreamCallbacks for CancelOnFirstChunk {
            fn on_chunk(&mut self, text: &str) {
                self.calls.push(Call::Chunk(text.to_string()));
                self.cancel.cancel();
            }
            fn on_error(&mut self, message: &str) {
                self.calls.push(Call::Error(message.to_string()));
            }
            fn on_complete(&mut self) {
                self.calls.push(Call::Complete);
            }
        }

        // One read yields three events; the last two are still queued when
        // the first callback cancels
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::text_chunks([concat!(
            "event:message\ndata:{\"content\":\"a\"}\n\n",
            "event:message\ndata:{\"content\":\"b\"}\n\n",
            "event:message\ndata:{\"done\":true}\n\n",
        )]));
        let client = client_with(&http, InMemoryCredentials::with_token("tok"));

        let cancel = CancelToken::new();
        let mut callbacks = CancelOnFirstChunk {
            cancel: cancel.clone(),
            calls: Vec::new(),
        };
        let outcome = client
            .stream_chat(&ChatRequest::new("q"), &mut callbacks, &cancel)
            .await;

        assert_eq!(callbacks.calls, vec![chunk("a")]);
        assert!(matches!(outcome, StreamOutcome::Cancelled));
    }

    #[tokio::test]
    async fn test_stream_events_happy_path() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::text_chunks([
            "event:message\ndata:{\"content\":\"A\"}\n\nevent:message\ndata:{\"con",
            "tent\":\"B\"}\n\n",
        ]));
        let client = client_with(&http, InMemoryCredentials::with_token("tok"));

        let events: Vec<StreamEvent> = client
            .stream_events(ChatRequest::new("q"), CancelToken::new())
            .collect()
            .await;

        assert_eq!(
            events,
            vec![
                StreamEvent::Content("A".to_string()),
                StreamEvent::Content("B".to_string()),
                StreamEvent::Done
            ]
        );
    }

    #[tokio::test]
    async fn test_stream_events_is_lazy() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::text_chunks(["data:{\"done\":true}\n\n"]));
        let client = client_with(&http, InMemoryCredentials::with_token("tok"));

        let events = client.stream_events(ChatRequest::new("q"), CancelToken::new());
        assert!(http.get_requests().is_empty());

        let collected: Vec<_> = events.collect().await;
        assert_eq!(collected, vec![StreamEvent::Done]);
        assert_eq!(http.get_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_stream_events_maps_failures_to_error_event() {
        let http = MockHttpClient::new();
        let client = client_with(&http, InMemoryCredentials::new());

        let events: Vec<_> = client
            .stream_events(ChatRequest::new("q"), CancelToken::new())
            .collect()
            .await;

        assert_eq!(
            events,
            vec![StreamEvent::Error(NOT_AUTHENTICATED_MESSAGE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_stream_events_ends_on_cancel() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::OpenStream(vec![bytes::Bytes::from(
            "data:{\"content\":\"x\"}\n\n",
        )]));
        let client = client_with(&http, InMemoryCredentials::with_token("tok"));
        let cancel = CancelToken::new();

        let mut events = client.stream_events(ChatRequest::new("q"), cancel.clone());
        assert_eq!(events.next().await, Some(StreamEvent::Content("x".to_string())));

        cancel.cancel();
        let next = tokio::time::timeout(Duration::from_secs(1), events.next())
            .await
            .unwrap();
        assert_eq!(next, None);
    }

    #[tokio::test]
    async fn test_independent_streams_do_not_share_state() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://judge.test/a",
            MockResponse::text_chunks(["data:{\"content\":\"from-a\"}\n\n"]),
        );
        http.set_response(
            "http://judge.test/b",
            MockResponse::text_chunks(["data:{\"content\":\"from-b\"}\n\n"]),
        );
        let creds = Arc::new(InMemoryCredentials::with_token("tok"));

        let client_a = AssistantClient::new(
            AssistConfig::default().with_base_url("http://judge.test").with_stream_path("a"),
            Arc::new(http.clone()),
            creds.clone(),
        );
        let client_b = AssistantClient::new(
            AssistConfig::default().with_base_url("http://judge.test").with_stream_path("b"),
            Arc::new(http.clone()),
            creds,
        );

        let (a, b) = tokio::join!(
            client_a
                .stream_events(ChatRequest::new("q"), CancelToken::new())
                .collect::<Vec<_>>(),
            client_b
                .stream_events(ChatRequest::new("q"), CancelToken::new())
                .collect::<Vec<_>>(),
        );

        assert_eq!(a, vec![StreamEvent::Content("from-a".to_string()), StreamEvent::Done]);
        assert_eq!(b, vec![StreamEvent::Content("from-b".to_string()), StreamEvent::Done]);
    }

    #[test]
    fn test_driver_phase_display() {
        assert_eq!(DriverPhase::Authorizing.to_string(), "authorizing");
        assert_eq!(DriverPhase::Terminated.as_str(), "terminated");
    }
}
