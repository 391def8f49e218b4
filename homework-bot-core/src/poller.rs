//! Poll loop: fetch, validate, format, deduplicate, notify, sleep.

use crate::client::HomeworkSource;
use crate::error::{BotError, Result};
use crate::models::parse_status;
use crate::services::Notifier;
use crate::validation::{check_response, current_date, latest_homework};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Loop state carried from one cycle to the next. Nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// Lower bound (`from_date`) of the next query, Unix time
    pub cursor: i64,
    /// Most recently delivered notification
    pub last_message: Option<String>,
}

impl PollState {
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            last_message: None,
        }
    }

    /// State for a fresh process: cursor at the current time.
    pub fn starting_now() -> Self {
        Self::new(chrono::Utc::now().timestamp())
    }
}

/// What a single cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Valid response without homework records; nothing to send
    NoUpdates,
    /// Notification delivered
    Sent,
    /// Message equal to the last delivered one; not sent again
    Suppressed,
    /// Provider rejected the notification; state left unchanged
    DispatchFailed,
}

/// Result of [`Poller::poll_once`]
#[derive(Debug, Clone)]
pub struct PollCycle {
    pub state: PollState,
    pub outcome: CycleOutcome,
    /// Candidate notification of this cycle, if any
    pub message: Option<String>,
}

/// Notification text for a failed cycle.
pub fn failure_message(err: &BotError) -> String {
    format!("Program failure: {}", err)
}

pub struct Poller {
    source: Arc<dyn HomeworkSource>,
    notifier: Notifier,
    retry_period: Duration,
}

impl Poller {
    pub fn new(
        source: Arc<dyn HomeworkSource>,
        notifier: Notifier,
        retry_period: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            retry_period,
        }
    }

    pub fn retry_period(&self) -> Duration {
        self.retry_period
    }

    /// Fetch and validate, then render the newest homework record if there is one.
    async fn check_updates(&self, cursor: i64) -> Result<(Value, Option<String>)> {
        let response = self.source.fetch(cursor).await?;
        check_response(&response)?;
        let message = match latest_homework(&response) {
            Some(homework) => Some(parse_status(homework)?),
            None => {
                tracing::debug!(cursor, "No updates");
                None
            }
        };
        Ok((response, message))
    }

    /// Run one cycle against `state` and return the state for the next one.
    pub async fn poll_once(&self, state: PollState) -> PollCycle {
        let (response, message) = match self.check_updates(state.cursor).await {
            Ok((response, message)) => (Some(response), message),
            Err(err) => {
                let message = failure_message(&err);
                tracing::error!(kind = %err.kind(), "{}", message);
                (None, Some(message))
            }
        };

        let Some(message) = message else {
            return PollCycle {
                state,
                outcome: CycleOutcome::NoUpdates,
                message: None,
            };
        };

        if state.last_message.as_deref() == Some(message.as_str()) {
            tracing::debug!("Message already sent, skipping");
            return PollCycle {
                state,
                outcome: CycleOutcome::Suppressed,
                message: Some(message),
            };
        }

        if !self.notifier.notify(&message).await {
            return PollCycle {
                state,
                outcome: CycleOutcome::DispatchFailed,
                message: Some(message),
            };
        }

        let cursor = match response.as_ref() {
            Some(response) => current_date(response).unwrap_or_else(|| {
                tracing::warn!(
                    cursor = state.cursor,
                    "Response has no current_date, keeping cursor"
                );
                state.cursor
            }),
            None => state.cursor,
        };

        PollCycle {
            state: PollState {
                cursor,
                last_message: Some(message.clone()),
            },
            outcome: CycleOutcome::Sent,
            message: Some(message),
        }
    }

    /// Poll forever, sleeping `retry_period` after every cycle.
    pub async fn run(&self, mut state: PollState) {
        tracing::info!(
            cursor = state.cursor,
            retry_period_secs = self.retry_period.as_secs(),
            sink = self.notifier.sink_name(),
            "Starting poll loop"
        );
        loop {
            let cycle = self.poll_once(state).await;
            tracing::debug!(
                outcome = ?cycle.outcome,
                cursor = cycle.state.cursor,
                "Cycle finished"
            );
            state = cycle.state;
            tokio::time::sleep(self.retry_period).await;
        }
    }
}
