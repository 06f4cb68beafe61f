//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - scripted chunk streams and request recording
//! - [`InMemoryCredentials`] - in-memory credential storage

pub mod credentials;
pub mod http;

pub use credentials::InMemoryCredentials;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
