//! Telegram communication provider: send messages via the Bot API.

use crate::error::{BotError, Result};
use crate::models::DEFAULT_TELEGRAM_API_BASE;
use crate::providers::NotificationSink;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Telegram notification sink (sendMessage). Token and chat_id from env.
pub struct TelegramSink {
    api_base: String,
    token: String,
    chat_id: String,
    client: Client,
}

#[derive(serde::Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramSink {
    /// Create a sink for `chat_id`. Never log the token.
    pub fn new(token: String, chat_id: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            BotError::configuration(format!("cannot build HTTP client: {}", e)).with_source(e)
        })?;
        Ok(Self {
            api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            token,
            chat_id,
            client,
        })
    }

    /// Override the Bot API base URL (self-hosted Bot API server or tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }

    async fn send_message(&self, text: &str) -> Result<()> {
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });
        // reqwest errors carry the URL, which contains the token
        let res = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                BotError::dispatch(format!(
                    "Telegram request failed: {}",
                    e.without_url()
                ))
            })?;
        if !res.status().is_success() {
            let status = res.status();
            let err_body = res.text().await.unwrap_or_default();
            return Err(BotError::dispatch(format!(
                "Telegram API error {}: {}",
                status, err_body
            )));
        }
        let parsed: SendMessageResponse = res.json().await.map_err(|e| {
            BotError::dispatch(format!("Telegram response unreadable: {}", e.without_url()))
        })?;
        if !parsed.ok {
            return Err(BotError::dispatch(format!(
                "Telegram rejected message: {}",
                parsed.description.unwrap_or_default()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for TelegramSink {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, text: &str) -> Result<()> {
        self.send_message(text).await
    }
}
