//! Notification sink: outbound delivery to a messaging provider

use crate::error::Result;
use async_trait::async_trait;

/// Sink for delivering plain-text notifications to a provider (e.g. Telegram).
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Provider name for logging (e.g. "telegram").
    fn name(&self) -> &str;

    /// Deliver `text` to the configured chat. Failures are dispatch errors.
    async fn send(&self, text: &str) -> Result<()>;
}
