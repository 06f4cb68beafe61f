//! CLI module for judge-assistant.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - The `ask` command that streams an answer to the terminal
//!
//! # Usage
//!
//! ```ignore
//! use judge_assistant::cli::{parse_args, run_cli_command};
//! use judge_assistant::config::AssistConfig;
//!
//! let command = parse_args(std::env::args())?;
//! let status = run_cli_command(command, AssistConfig::from_env()).await?;
//! std::process::exit(status);
//! ```

pub mod args;
pub mod ask;
pub mod version;

pub use args::{parse_args, ArgsError, AskArgs, CliCommand, USAGE};
pub use ask::{handle_ask_command, ConsoleCallbacks};
pub use version::{handle_version_command, VERSION};

use color_eyre::Result;

use crate::config::AssistConfig;

/// Run a parsed CLI command and return the process exit status.
pub async fn run_cli_command(command: CliCommand, config: AssistConfig) -> Result<i32> {
    match command {
        CliCommand::Version => {
            handle_version_command();
            Ok(0)
        }
        CliCommand::Help => {
            print!("{}", USAGE);
            Ok(0)
        }
        CliCommand::Ask(args) => handle_ask_command(args, config).await,
    }
}
