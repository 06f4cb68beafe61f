//! Authentication module.
//!
//! Provides storage for the bearer credentials the assistant stream needs.

pub mod credentials;

pub use credentials::{Credentials, CredentialsManager};
