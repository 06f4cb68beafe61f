//! Event and line types produced by the stream decoder.

/// What the consumer sees from one assistant stream.
///
/// A well-behaved sequence is zero or more `Content` items followed by at
/// most one terminal item (`Error` or `Done`). `Incomplete` may appear just
/// before `Done` when the stream ended in the middle of a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Next fragment of the assistant response
    Content(String),
    /// Server-reported error; ends the stream
    Error(String),
    /// The stream ended while a payload was still unparseable.
    ///
    /// Carries the raw partial data so callers can decide what to show.
    Incomplete(String),
    /// Successful end of the stream
    Done,
}

impl StreamEvent {
    /// Whether no further events follow this one.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Error(_) | StreamEvent::Done)
    }
}

/// One classified line of SSE text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// Empty or whitespace-only line
    Blank,
    /// `event:` with its trimmed value
    Event(String),
    /// `data:` with its trimmed value
    Data(String),
    /// `id:` line; not part of the payload contract
    Id,
    /// Anything else, kept verbatim
    Other(String),
}

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.trim().is_empty() {
        return SseLine::Blank;
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    if line.starts_with("id:") {
        return SseLine::Id;
    }

    SseLine::Other(line.to_string())
}
