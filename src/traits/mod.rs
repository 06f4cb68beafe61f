//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - streaming HTTP POST
//! - [`CredentialsProvider`] - bearer token storage and retrieval

pub mod credentials;
pub mod http;

pub use credentials::{CredentialsError, CredentialsProvider};
pub use http::{ByteStream, Headers, HttpClient, HttpError};
