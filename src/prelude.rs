//! Prelude module for convenient imports.
//!
//! ```ignore
//! use judge_assistant::prelude::*;
//! ```

// Client and driver types
pub use crate::client::{AssistantClient, DriverPhase, EventStream, StreamOutcome};

// Consumer side
pub use crate::callbacks::{FnCallbacks, StreamCallbacks};
pub use crate::cancel::CancelToken;

// Request and configuration
pub use crate::config::AssistConfig;
pub use crate::models::ChatRequest;

// Decoded events
pub use crate::sse::StreamEvent;

// Errors
pub use crate::error::{AssistError, AssistResult};
