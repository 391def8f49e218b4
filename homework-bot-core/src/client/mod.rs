//! Clients for the homework review API

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

mod practicum;

pub use practicum::PracticumClient;

/// Source of homework status responses.
///
/// The poll loop only depends on this trait; [`PracticumClient`] is the
/// production implementation.
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch the statuses changed since `from_date` (Unix time). Returns the
    /// decoded body without shape validation.
    async fn fetch(&self, from_date: i64) -> Result<Value>;
}
