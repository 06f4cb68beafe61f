//! Line reassembly for SSE text.

/// Buffer for accumulating incomplete SSE lines across chunk boundaries.
///
/// Decoded text arrives in pieces that do not align with line boundaries.
/// Complete lines (terminated by `\n`) are handed out in order; the trailing
/// partial segment stays buffered until more text arrives or the stream ends.
///
/// Unlike a frame parser, blank lines are preserved: they carry meaning for
/// the frame state machine.
///
/// # Example
/// ```
/// use judge_assistant::sse::LineBuffer;
///
/// let mut buffer = LineBuffer::new();
///
/// let lines = buffer.push("data: {\"content\":\"hel");
/// assert!(lines.is_empty());
///
/// let lines = buffer.push("lo\"}\n\n");
/// assert_eq!(lines, vec!["data: {\"content\":\"hello\"}", ""]);
/// ```
#[derive(Debug, Default)]
pub struct LineBuffer {
    /// Text after the last line terminator seen so far
    incomplete: String,
}

impl LineBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append decoded text and return every line it completed.
    ///
    /// Terminators are stripped, including a `\r` preceding the `\n`.
    pub fn push(&mut self, text: &str) -> Vec<String> {
        // Only the new text can contain a newline
        let Some(last_newline) = text.rfind('\n') else {
            self.incomplete.push_str(text);
            return Vec::new();
        };
        let last_newline = self.incomplete.len() + last_newline;
        self.incomplete.push_str(text);

        let rest = self.incomplete.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.incomplete, rest);

        complete
            .split_terminator('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect()
    }

    /// Take whatever is left at end of stream as one final line.
    ///
    /// Returns `None` if the stream ended exactly on a line boundary.
    pub fn flush(&mut self) -> Option<String> {
        if self.incomplete.is_empty() {
            return None;
        }

        let line = std::mem::take(&mut self.incomplete);
        Some(match line.strip_suffix('\r') {
            Some(stripped) => stripped.to_string(),
            None => line,
        })
    }

    /// Check if there's any incomplete data remaining in the buffer.
    pub fn has_incomplete(&self) -> bool {
        !self.incomplete.is_empty()
    }

    /// Get any remaining incomplete data.
    pub fn remaining(&self) -> &str {
        &self.incomplete
    }
}
