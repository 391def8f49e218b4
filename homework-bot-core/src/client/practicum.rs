//! Practicum homework statuses API client

use super::HomeworkSource;
use crate::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Keys the API uses to report an error inside a 200 response, checked in order.
const SOFT_ERROR_KEYS: [&str; 2] = ["code", "error"];

/// Client for `GET <endpoint>?from_date=<cursor>`. Never log the token.
pub struct PracticumClient {
    endpoint: String,
    token: String,
    client: Client,
}

impl PracticumClient {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            BotError::configuration(format!("cannot build HTTP client: {}", e)).with_source(e)
        })?;
        Ok(Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request parameters for error messages (the token is left out).
    fn describe_request(&self, from_date: i64) -> String {
        format!("endpoint={}, from_date={}", self.endpoint, from_date)
    }

    async fn get_api_answer(&self, from_date: i64) -> Result<Value> {
        tracing::debug!(from_date, "Requesting homework statuses");

        let res = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                BotError::connectivity(format!(
                    "endpoint unreachable: {}. Params: {}",
                    e,
                    self.describe_request(from_date)
                ))
                .with_source(e)
            })?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(BotError::protocol(format!(
                "unexpected status {}. Params: {}",
                status.as_u16(),
                self.describe_request(from_date)
            )));
        }

        let body = res.text().await.map_err(|e| {
            BotError::connectivity(format!(
                "failed to read response body: {}. Params: {}",
                e,
                self.describe_request(from_date)
            ))
            .with_source(e)
        })?;

        let response: Value = serde_json::from_str(&body).map_err(|e| {
            BotError::protocol(format!(
                "response is not valid JSON: {}. Params: {}",
                e,
                self.describe_request(from_date)
            ))
            .with_source(e)
        })?;

        if let Some(object) = response.as_object() {
            for key in SOFT_ERROR_KEYS {
                if let Some(value) = object.get(key) {
                    return Err(BotError::protocol(format!(
                        "server reported {}: {}. Params: {}",
                        key,
                        value,
                        self.describe_request(from_date)
                    )));
                }
            }
        }

        Ok(response)
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        self.get_api_answer(from_date).await
    }
}
