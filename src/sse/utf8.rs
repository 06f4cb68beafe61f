//! Incremental UTF-8 decoding across chunk boundaries.
//!
//! Network reads split the body at arbitrary byte offsets, so a multi-byte
//! character can straddle two chunks. [`Utf8Decoder`] holds back the
//! incomplete tail of each chunk and completes it with the next one.

/// Longest possible UTF-8 encoded code point.
const MAX_SEQUENCE_LEN: usize = 4;

/// Stateful byte-to-text adapter.
///
/// Malformed input never fails: invalid sequences are replaced with
/// U+FFFD the same way [`String::from_utf8_lossy`] does.
///
/// # Example
///
/// ```
/// use judge_assistant::sse::Utf8Decoder;
///
/// let mut decoder = Utf8Decoder::new();
/// let bytes = "héllo".as_bytes();
///
/// // Split inside the two-byte 'é'
/// assert_eq!(decoder.decode(&bytes[..2]), "h");
/// assert_eq!(decoder.decode(&bytes[2..]), "éllo");
/// assert_eq!(decoder.finish(), "");
/// ```
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Bytes of a code point whose remainder has not arrived yet
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Create a decoder with no pending bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk, returning every character that is now complete.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        if self.pending.is_empty() {
            return self.decode_owned(bytes);
        }

        let mut joined = std::mem::take(&mut self.pending);
        joined.extend_from_slice(bytes);
        self.decode_owned(&joined)
    }

    /// Signal end of input.
    ///
    /// A dangling partial sequence cannot be completed any more and is
    /// emitted as a single replacement character.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }

    /// Whether a partial sequence is being held back.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn decode_owned(&mut self, mut input: &[u8]) -> String {
        let mut out = String::with_capacity(input.len());

        loop {
            match std::str::from_utf8(input) {
                Ok(valid) => {
                    out.push_str(valid);
                    return out;
                }
                Err(err) => {
                    let (valid, rest) = input.split_at(err.valid_up_to());
                    // Prefix is valid, so this borrows rather than replacing
                    out.push_str(&String::from_utf8_lossy(valid));

                    match err.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            input = &rest[bad..];
                        }
                        None => {
                            // Truncated sequence at the end of the chunk
                            debug_assert!(rest.len() < MAX_SEQUENCE_LEN);
                            self.pending.extend_from_slice(rest);
                            return out;
                        }
                    }
                }
            }
        }
    }
}
