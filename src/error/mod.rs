//! Error handling for assistant streams.
//!
//! - **Categories**: high-level classification for retry decisions
//! - **Unified error type**: [`AssistError`] covers every failure class
//! - **Response messages**: extracting a readable message from a rejected request
//!
//! | Failure | Variant | Category |
//! |---------|---------|----------|
//! | No token | `NotAuthenticated` | Auth |
//! | Token store broken | `Credentials` | System |
//! | Non-2xx response | `Http` | Auth / Server / Client by status |
//! | Connection or read failure | `Transport` | Network |
//! | `error` payload in the stream | `Protocol` | Server |
//!
//! A payload that fails to parse is not an error at all; see the frame
//! state machine's split-JSON recovery.

mod assist_error;
mod category;
mod response;

pub use assist_error::{AssistError, GENERIC_STREAM_ERROR, NOT_AUTHENTICATED_MESSAGE};
pub use category::ErrorCategory;
pub use response::error_message_from_body;

/// Type alias for Results using AssistError.
pub type AssistResult<T> = Result<T, AssistError>;
