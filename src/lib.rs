//! judge-assistant - streaming client for the judge platform's AI assistant
//!
//! Sends a learner's question to the assistant endpoint and decodes the
//! Server-Sent Events answer incrementally: bytes are decoded as UTF-8
//! across chunk boundaries, reassembled into lines, grouped into frames
//! and interpreted as JSON payloads, with recovery for payloads split
//! across several lines.
//!
//! The [`sse`] module is transport-free and can be driven directly; the
//! [`client`] module wires it to an [`traits::HttpClient`] and a
//! [`traits::CredentialsProvider`].

pub mod adapters;
pub mod auth;
pub mod callbacks;
pub mod cancel;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod prelude;
pub mod sse;
pub mod traits;
