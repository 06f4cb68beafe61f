//! Chunk-level decoder tying the pipeline stages together.

use super::events::StreamEvent;
use super::frame::{FrameMachine, FrameState};
use super::lines::LineBuffer;
use super::utf8::Utf8Decoder;

/// Decoding context for one assistant stream.
///
/// Owns every piece of per-stream state, so two streams never share
/// anything. Feed it raw transport chunks in arrival order and call
/// [`finish`](Self::finish) once the transport reports end of input.
///
/// Once a terminal event (`Error` or `Done`) has been returned, the decoder
/// ignores all further input, including the rest of the chunk that carried
/// the terminal event.
///
/// # Example
///
/// ```
/// use judge_assistant::sse::{StreamDecoder, StreamEvent};
///
/// let mut decoder = StreamDecoder::new();
/// let mut events = decoder.feed(b"event:message\ndata:{\"cont");
/// events.extend(decoder.feed(b"ent\":\"Hi\"}\n\n"));
/// events.extend(decoder.finish());
///
/// assert_eq!(
///     events,
///     vec![StreamEvent::Content("Hi".to_string()), StreamEvent::Done]
/// );
/// ```
#[derive(Debug, Default)]
pub struct StreamDecoder {
    text: Utf8Decoder,
    lines: LineBuffer,
    frames: FrameMachine,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one raw chunk.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        if self.is_terminated() {
            return Vec::new();
        }

        let text = self.text.decode(chunk);
        let lines = self.lines.push(&text);
        self.process_lines(lines)
    }

    /// Process end of input.
    ///
    /// Flushes any un-terminated trailing line through the frame machine.
    /// Unless a terminal event was already produced, the result ends with
    /// `Done`, preceded by `Incomplete` if a payload never parsed.
    pub fn finish(&mut self) -> Vec<StreamEvent> {
        if self.is_terminated() {
            return Vec::new();
        }

        let tail = self.text.finish();
        let mut lines = self.lines.push(&tail);
        lines.extend(self.lines.flush());

        let mut events = self.process_lines(lines);
        if self.is_terminated() {
            return events;
        }

        events.extend(self.frames.finish());
        events.push(StreamEvent::Done);
        self.frames.mark_finished();
        events
    }

    /// True once an `Error` or `Done` has been produced.
    pub fn is_terminated(&self) -> bool {
        self.frames.is_finished()
    }

    /// Frame-level state, for diagnostics.
    pub fn frame_state(&self) -> FrameState {
        self.frames.state()
    }

    fn process_lines(&mut self, lines: Vec<String>) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        for line in lines {
            events.extend(self.frames.feed_line(&line));
            if self.frames.is_finished() {
                break;
            }
        }
        events
    }
}
