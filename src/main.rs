use color_eyre::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use judge_assistant::cli::{parse_args, run_cli_command, USAGE};
use judge_assistant::config::AssistConfig;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Logs go to stderr so they never mix with the streamed answer
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "judge_assistant=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let config = AssistConfig::from_env();
    debug!(url = %config.stream_url(), "Loaded configuration");

    let status = run_cli_command(command, config).await?;
    std::process::exit(status);
}
