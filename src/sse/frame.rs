//! Frame state machine.
//!
//! Accumulates `event:` and `data:` lines into a pending frame and hands it
//! to the payload interpreter when the frame closes. A frame closes on a
//! blank line, or eagerly as soon as its data parses, since the server may
//! send `event` + `data` without a trailing blank separator.
//!
//! When a payload fails to parse, the frame stays open: the JSON object may
//! have been broken across lines, and every following unprefixed line is
//! appended to the data and parsing retried.

use tracing::{debug, trace, warn};

use super::events::{parse_sse_line, SseLine, StreamEvent};
use super::payload::Payload;

/// One reconstructed logical unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Value of the `event:` line, empty if none was sent
    pub event: String,
    /// Raw JSON text of the `data:` line(s)
    pub data: String,
}

/// Whether anything is waiting for more lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Idle,
    Accumulating,
}

/// Stateful line-to-event converter for one stream.
#[derive(Debug, Default)]
pub struct FrameMachine {
    pending_event: String,
    pending_data: String,
    /// Set once a terminal payload has been dispatched
    finished: bool,
}

impl FrameMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FrameState {
        if self.pending_event.is_empty() && self.pending_data.is_empty() {
            FrameState::Idle
        } else {
            FrameState::Accumulating
        }
    }

    /// True after an `error` or `done` payload; further lines are ignored.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Feed one complete line (terminator already stripped).
    pub fn feed_line(&mut self, line: &str) -> Vec<StreamEvent> {
        if self.finished {
            return Vec::new();
        }

        match parse_sse_line(line) {
            SseLine::Blank => self.close_on_blank(),
            SseLine::Event(event) => {
                self.pending_event = event;
                Vec::new()
            }
            SseLine::Data(data) => {
                // A second data line replaces the first
                self.pending_data = data;
                self.try_dispatch().unwrap_or_default()
            }
            SseLine::Id => Vec::new(),
            SseLine::Other(text) => {
                if self.pending_data.is_empty() {
                    trace!(line = %text, "Ignoring stray line outside a frame");
                    return Vec::new();
                }
                self.pending_data.push_str(&text);
                self.try_dispatch().unwrap_or_default()
            }
        }
    }

    /// End of input. Reports a frame whose data never became valid JSON.
    pub fn finish(&mut self) -> Option<StreamEvent> {
        if self.finished || self.pending_data.is_empty() {
            self.reset();
            return None;
        }

        let frame = self.take_frame();
        warn!(
            event = %frame.event,
            bytes = frame.data.len(),
            "Stream ended with an incomplete payload"
        );
        Some(StreamEvent::Incomplete(frame.data))
    }

    pub(crate) fn mark_finished(&mut self) {
        self.finished = true;
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.pending_event.clear();
        self.pending_data.clear();
    }

    fn close_on_blank(&mut self) -> Vec<StreamEvent> {
        if self.pending_data.is_empty() {
            // Nothing to close; drop a dangling event name
            self.pending_event.clear();
            return Vec::new();
        }

        match self.try_dispatch() {
            Ok(events) => events,
            Err(err) => {
                let frame = self.take_frame();
                warn!(
                    event = %frame.event,
                    error = %err,
                    "Dropping frame with unparseable payload"
                );
                Vec::new()
            }
        }
    }

    /// Parse the pending data; on success the frame is consumed.
    fn try_dispatch(&mut self) -> Result<Vec<StreamEvent>, serde_json::Error> {
        let payload = match Payload::parse(&self.pending_data) {
            Ok(payload) => payload,
            Err(err) => {
                trace!(error = %err, "Payload not yet parseable, waiting for continuation");
                return Err(err);
            }
        };

        let frame = self.take_frame();
        if payload.is_terminal() {
            debug!(event = %frame.event, "Terminal payload received");
            self.finished = true;
        }
        Ok(payload.into_events())
    }

    fn take_frame(&mut self) -> Frame {
        Frame {
            event: std::mem::take(&mut self.pending_event),
            data: std::mem::take(&mut self.pending_data),
        }
    }
}
