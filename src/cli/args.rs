//! Command-line argument parsing for the judge-assistant CLI.

use std::path::PathBuf;

use thiserror::Error;

/// Usage text printed by `--help` and after argument errors.
pub const USAGE: &str = "\
Usage: judge-assistant ask <message> [options]
       judge-assistant --version
       judge-assistant --help

Options for ask:
  --problem <id>       Problem the question is about
  --language <lang>    Language of the attached code
  --code-file <path>   Attach the contents of a source file
  --context <text>     Extra context, e.g. the last verdict

Environment:
  JUDGE_API_URL, JUDGE_ASSIST_STREAM_PATH, JUDGE_CONNECT_TIMEOUT_SECS,
  JUDGE_CREDENTIALS_PATH, RUST_LOG
";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Stream one assistant answer
    Ask(AskArgs),
}

/// Arguments of the `ask` subcommand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AskArgs {
    pub message: String,
    pub problem_id: Option<String>,
    pub language: Option<String>,
    pub code_file: Option<PathBuf>,
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("missing command")]
    MissingCommand,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("missing message for ask")]
    MissingMessage,
    #[error("option {0} requires a value")]
    MissingValue(String),
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// Parse command-line arguments and return the command to run.
///
/// # Examples
///
/// ```
/// use judge_assistant::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["judge-assistant".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);

    match args.next().as_deref() {
        None => Err(ArgsError::MissingCommand),
        Some("--version") | Some("-V") => Ok(CliCommand::Version),
        Some("--help") | Some("-h") | Some("help") => Ok(CliCommand::Help),
        Some("ask") => parse_ask(args).map(CliCommand::Ask),
        Some(other) => Err(ArgsError::UnknownCommand(other.to_string())),
    }
}

fn parse_ask<I>(mut args: I) -> Result<AskArgs, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut ask = AskArgs::default();
    let mut message: Option<String> = None;

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
        };

        match arg.as_str() {
            "--problem" => ask.problem_id = Some(value("--problem")?),
            "--language" => ask.language = Some(value("--language")?),
            "--code-file" => ask.code_file = Some(PathBuf::from(value("--code-file")?)),
            "--context" => ask.context = Some(value("--context")?),
            flag if flag.starts_with("--") => {
                return Err(ArgsError::UnknownOption(flag.to_string()))
            }
            text if message.is_none() => message = Some(text.to_string()),
            text => return Err(ArgsError::UnexpectedArgument(text.to_string())),
        }
    }

    ask.message = message
        .filter(|m| !m.trim().is_empty())
        .ok_or(ArgsError::MissingMessage)?;
    Ok(ask)
}
