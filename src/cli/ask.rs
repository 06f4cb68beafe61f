//! The `ask` command: stream one answer to the terminal.

use std::io::{self, Write};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tracing::{debug, info};

use super::args::AskArgs;
use crate::callbacks::StreamCallbacks;
use crate::cancel::CancelToken;
use crate::client::{AssistantClient, StreamOutcome};
use crate::config::AssistConfig;
use crate::models::ChatRequest;

/// Exit status when the user interrupted the stream.
pub const EXIT_CANCELLED: i32 = 130;

/// Writes chunks to `out` as they arrive and failures to `err`.
pub struct ConsoleCallbacks<O, E> {
    out: O,
    err: E,
    wrote_content: bool,
}

impl<O, E> ConsoleCallbacks<O, E>
where
    O: Write + Send,
    E: Write + Send,
{
    pub fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            wrote_content: false,
        }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O, E> StreamCallbacks for ConsoleCallbacks<O, E>
where
    O: Write + Send,
    E: Write + Send,
{
    fn on_chunk(&mut self, text: &str) {
        self.wrote_content = true;
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            debug!("Failed to write chunk: {}", e);
        }
    }

    fn on_error(&mut self, message: &str) {
        if self.wrote_content {
            let _ = writeln!(self.out);
        }
        let _ = writeln!(self.err, "error: {}", message);
    }

    fn on_complete(&mut self) {
        if self.wrote_content {
            let _ = writeln!(self.out);
        }
        let _ = self.out.flush();
    }

    fn on_incomplete(&mut self, _partial: &str) {
        let _ = writeln!(self.err, "warning: the response ended in the middle of a message");
    }
}

/// Assemble the request body from the parsed arguments.
pub fn build_request(args: &AskArgs) -> Result<ChatRequest> {
    let mut request = ChatRequest::new(args.message.clone());

    if let Some(problem_id) = &args.problem_id {
        request = request.with_problem_id(problem_id.clone());
    }
    if let Some(path) = &args.code_file {
        let code = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read code file {}", path.display()))?;
        request.code = Some(code);
    }
    if let Some(language) = &args.language {
        request = request.with_language(language.clone());
    }
    if let Some(context) = &args.context {
        request = request.with_context(context.clone());
    }

    Ok(request)
}

/// Process exit status for a finished stream.
pub fn exit_code(outcome: &StreamOutcome) -> i32 {
    match outcome {
        StreamOutcome::Completed => 0,
        StreamOutcome::Failed(_) => 1,
        StreamOutcome::Cancelled => EXIT_CANCELLED,
    }
}

/// Handle the `ask` command. Returns the process exit status.
///
/// Ctrl-C cancels the stream; whatever was already printed stays.
pub async fn handle_ask_command(args: AskArgs, config: AssistConfig) -> Result<i32> {
    let request = build_request(&args)?;
    let client = AssistantClient::from_config(config)?;

    let cancel = CancelToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, cancelling stream");
                cancel.cancel();
            }
        })
    };

    let mut console = ConsoleCallbacks::new(io::stdout(), io::stderr());
    let outcome = client.stream_chat(&request, &mut console, &cancel).await;
    interrupt.abort();

    Ok(exit_code(&outcome))
}
