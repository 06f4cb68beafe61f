//! Payload interpretation for assistant frames.
//!
//! The `data:` field of every frame carries one JSON object with up to three
//! recognized fields:
//!
//! | Field | Type | Meaning |
//! |-------|------|---------|
//! | `content` | string | next fragment of the response |
//! | `error` | string | terminates the stream with a user-facing message |
//! | `done` | bool | terminates the stream successfully when `true` |

use serde_json::Value;

use super::events::StreamEvent;

/// Parsed JSON contract of one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    pub content: Option<String>,
    pub error: Option<String>,
    pub done: Option<bool>,
}

impl Payload {
    /// Parse frame data.
    ///
    /// Only a JSON syntax failure is an error; that is what signals a payload
    /// split across reads. Well-formed JSON with unexpected shape yields an
    /// empty payload, and fields of the wrong type are ignored.
    pub fn parse(data: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(data)?;

        Ok(Self {
            content: value.get("content").and_then(Value::as_str).map(str::to_string),
            error: value.get("error").and_then(Value::as_str).map(str::to_string),
            done: value.get("done").and_then(Value::as_bool),
        })
    }

    /// Whether this payload ends the stream.
    pub fn is_terminal(&self) -> bool {
        self.error.is_some() || self.done == Some(true)
    }

    /// Translate into consumer events in dispatch order.
    ///
    /// `error` wins over everything else. Otherwise `content` is emitted
    /// before a `done` carried in the same payload.
    pub fn into_events(self) -> Vec<StreamEvent> {
        if let Some(message) = self.error {
            return vec![StreamEvent::Error(message)];
        }

        let mut events = Vec::with_capacity(2);
        if let Some(text) = self.content {
            events.push(StreamEvent::Content(text));
        }
        if self.done == Some(true) {
            events.push(StreamEvent::Done);
        }
        events
    }
}
