//! Notifier: sends through a sink and swallows delivery failures

use crate::providers::NotificationSink;
use crate::services::logging;
use std::sync::Arc;

/// Wraps a [`NotificationSink`]. A failed send is logged and reported as
/// `false`; it never propagates, so a delivery failure cannot trigger another
/// notification.
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn NotificationSink>,
}

impl Notifier {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    pub fn sink_name(&self) -> &str {
        self.sink.name()
    }

    /// Send `message`. Returns true when the provider accepted it.
    pub async fn notify(&self, message: &str) -> bool {
        tracing::debug!(sink = self.sink.name(), "Sending notification");
        match self.sink.send(message).await {
            Ok(()) => {
                tracing::debug!(sink = self.sink.name(), text = message, "Notification sent");
                true
            }
            Err(err) => {
                logging::log_dispatch_failure(self.sink.name(), message, &err.to_string());
                false
            }
        }
    }
}
