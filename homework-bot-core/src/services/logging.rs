//! Logging service

use crate::models::LogLevel;
use tracing_subscriber::EnvFilter;

/// Filter directive for the bot's own targets at `level`.
pub fn filter_directive(level: LogLevel) -> String {
    let level = level.as_str();
    format!("homework_bot_core={level},homework_bot={level}")
}

/// Initialize logging with the specified level. `RUST_LOG` takes precedence
/// when set.
pub fn init_logging(level: LogLevel) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(level)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .try_init()
}

/// Log a delivery failure
pub fn log_dispatch_failure(sink: &str, text: &str, error: &str) {
    tracing::error!(
        sink = sink,
        text = text,
        error = error,
        "Failed to send notification"
    );
}
