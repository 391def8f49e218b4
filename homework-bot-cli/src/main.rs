mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::handlers::{self, SettingsArgs};
use homework_bot_core::models::LogLevel;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(version)]
#[command(about = "Relay Practicum homework review status changes to a Telegram chat")]
#[command(
    help_template = "{name} - {version}\n{about}\n\n{usage-heading}\n  {usage}\n\n{all-args}{options}\n"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, default_value = "~/.config/homework-bot/config.toml")]
    config: String,

    /// Log level (error, warn, info, debug, trace); overrides the config file
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Seconds between polls; overrides the config file
    #[arg(long, global = true)]
    retry_period: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the homework API and relay status changes (default)
    Run,

    /// Report which credentials are set and validate the config file (no secrets)
    Check,

    /// Send a test message to the configured Telegram chat
    TestMessage {
        /// Message text
        #[arg(default_value = "homework-bot test message")]
        text: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Variables already present in the environment win over .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = SettingsArgs {
        config: cli.config,
        log_level: cli.log_level,
        retry_period: cli.retry_period,
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => handlers::handle_run(&settings).await?,
        Commands::Check => handlers::handle_check(&settings)?,
        Commands::TestMessage { text } => handlers::handle_test_message(&settings, &text).await?,
    }

    Ok(())
}
