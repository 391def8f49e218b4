//! CLI command handlers

use anyhow::{Context, Result};
use homework_bot_core::client::PracticumClient;
use homework_bot_core::models::{Configuration, Credentials, LogLevel};
use homework_bot_core::poller::{PollState, Poller};
use homework_bot_core::providers::{NotificationSink, TelegramSink};
use homework_bot_core::services::{logging, Notifier};
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_CONFIG_ARG: &str = "~/.config/homework-bot/config.toml";

/// Global options shared by every command
pub struct SettingsArgs {
    pub config: String,
    pub log_level: Option<LogLevel>,
    pub retry_period: Option<u64>,
}

fn resolve_config_path(config_arg: &str) -> Result<PathBuf> {
    if config_arg == DEFAULT_CONFIG_ARG {
        Configuration::default_config_path().context("Failed to get default config path")
    } else if let Some(rest) = config_arg.strip_prefix("~/") {
        let home = std::env::var("HOME").context("HOME environment variable not set")?;
        Ok(PathBuf::from(home).join(rest))
    } else {
        Ok(PathBuf::from(config_arg))
    }
}

/// Load the config file, apply command-line overrides and validate.
pub fn load_settings(args: &SettingsArgs) -> Result<Configuration> {
    let path = resolve_config_path(&args.config)?;
    let mut config = Configuration::load_from_file(&path)?;
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if let Some(secs) = args.retry_period {
        config.retry_period_secs = secs;
    }
    config
        .validate()
        .map_err(|errors| anyhow::anyhow!("Invalid configuration: {}", errors.join("; ")))?;
    Ok(config)
}

fn init_logging(level: LogLevel) -> Result<()> {
    logging::init_logging(level)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn build_sink(config: &Configuration, credentials: &Credentials) -> Result<TelegramSink> {
    let sink = TelegramSink::new(
        credentials.telegram_token.clone(),
        credentials.telegram_chat_id.clone(),
        config.request_timeout(),
    )?
    .with_api_base(config.telegram_api_base.clone());
    Ok(sink)
}

/// Handle the default 'run' command: poll until the process is killed.
pub async fn handle_run(args: &SettingsArgs) -> Result<()> {
    let config = load_settings(args)?;
    init_logging(config.log_level)?;

    let credentials = Credentials::from_env()?;
    let source = PracticumClient::new(
        config.endpoint.clone(),
        credentials.practicum_token.clone(),
        config.request_timeout(),
    )?;
    let sink = build_sink(&config, &credentials)?;

    let poller = Poller::new(
        Arc::new(source),
        Notifier::new(Arc::new(sink)),
        config.retry_period(),
    );
    poller.run(PollState::starting_now()).await;
    Ok(())
}

/// Handle the 'check' command. Prints presence only, never values.
pub fn handle_check(args: &SettingsArgs) -> Result<()> {
    let presence = Credentials::presence(|name| std::env::var(name).ok());
    println!("variable\tstatus");
    for (name, present) in &presence {
        println!("{}\t{}", name, if *present { "present" } else { "missing" });
    }

    let missing: Vec<&str> = presence
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    let config = load_settings(args)?;
    println!("endpoint\t{}", config.endpoint);
    println!("retry_period_secs\t{}", config.retry_period_secs);

    if !missing.is_empty() {
        anyhow::bail!("Missing required variables: {}", missing.join(", "));
    }
    Ok(())
}

/// Handle the 'test-message' command
pub async fn handle_test_message(args: &SettingsArgs, text: &str) -> Result<()> {
    let config = load_settings(args)?;
    init_logging(config.log_level)?;

    let credentials = Credentials::from_env()?;
    let sink = build_sink(&config, &credentials)?;
    sink.send(text)
        .await
        .with_context(|| format!("Send via {} failed", sink.name()))?;
    println!("Test message sent to Telegram");
    Ok(())
}
