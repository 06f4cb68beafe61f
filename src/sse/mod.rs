//! SSE (Server-Sent Events) stream decoder
//!
//! Turns the assistant's chunked response body into [`StreamEvent`]s.
//! The wire format is line-framed:
//! - `event: <name>` - optional event name line
//! - `data: <json>` - payload line
//! - Empty line - closes the frame (optional when the data already parsed)
//! - `id: <value>` - ignored
//!
//! # Module structure
//! - `utf8` - byte-to-text adapter preserving split multi-byte characters
//! - `lines` - line reassembly across chunks
//! - `frame` - frame state machine with split-JSON recovery
//! - `payload` - JSON payload contract
//! - `decoder` - the per-stream pipeline combining the above

mod decoder;
mod events;
mod frame;
mod lines;
mod payload;
mod utf8;

pub use decoder::StreamDecoder;
pub use events::{parse_sse_line, SseLine, StreamEvent};
pub use frame::{Frame, FrameMachine, FrameState};
pub use lines::LineBuffer;
pub use payload::Payload;
pub use utf8::Utf8Decoder;
