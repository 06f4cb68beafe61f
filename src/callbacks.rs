//! Consumer-side sink for assistant streams.

/// Receives the decoded stream.
///
/// `on_chunk` fires zero or more times in wire order. Then exactly one of
/// `on_error` / `on_complete` fires, unless the stream was cancelled, in
/// which case neither does. Nothing fires after the terminal call.
pub trait StreamCallbacks: Send {
    /// Next fragment of the assistant response.
    fn on_chunk(&mut self, text: &str);

    /// The stream failed; `message` is ready to show to the user.
    fn on_error(&mut self, message: &str);

    /// The stream finished normally.
    fn on_complete(&mut self);

    /// The stream ended inside a payload that never became valid JSON.
    ///
    /// Fires just before `on_complete`. Ignored by default.
    fn on_incomplete(&mut self, _partial: &str) {}
}

impl<C: StreamCallbacks + ?Sized> StreamCallbacks for &mut C {
    fn on_chunk(&mut self, text: &str) {
        (**self).on_chunk(text)
    }

    fn on_error(&mut self, message: &str) {
        (**self).on_error(message)
    }

    fn on_complete(&mut self) {
        (**self).on_complete()
    }

    fn on_incomplete(&mut self, partial: &str) {
        (**self).on_incomplete(partial)
    }
}

/// Callbacks assembled from three closures.
///
/// # Example
///
/// ```
/// use judge_assistant::callbacks::{FnCallbacks, StreamCallbacks};
///
/// let mut callbacks = FnCallbacks::new(
///     |text: &str| print!("{}", text),
///     |message: &str| eprintln!("error: {}", message),
///     || println!(),
/// );
/// callbacks.on_chunk("Hello");
/// ```
pub struct FnCallbacks<C, E, D> {
    on_chunk: C,
    on_error: E,
    on_complete: D,
}

impl<C, E, D> FnCallbacks<C, E, D>
where
    C: FnMut(&str) + Send,
    E: FnMut(&str) + Send,
    D: FnMut() + Send,
{
    pub fn new(on_chunk: C, on_error: E, on_complete: D) -> Self {
        Self {
            on_chunk,
            on_error,
            on_complete,
        }
    }
}

impl<C, E, D> StreamCallbacks for FnCallbacks<C, E, D>
where
    C: FnMut(&str) + Send,
    E: FnMut(&str) + Send,
    D: FnMut() + Send,
{
    fn on_chunk(&mut self, text: &str) {
        (self.on_chunk)(text)
    }

    fn on_error(&mut self, message: &str) {
        (self.on_error)(message)
    }

    fn on_complete(&mut self) {
        (self.on_complete)()
    }
}
