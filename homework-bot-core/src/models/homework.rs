//! Homework records and their review status

use crate::error::{BotError, Result};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub const HOMEWORK_NAME_KEY: &str = "homework_name";
pub const STATUS_KEY: &str = "status";

/// Review status reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Status code as sent by the API
    pub fn as_str(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict for this status
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => {
                "The work has been reviewed: the reviewer liked everything. Hooray!"
            }
            HomeworkStatus::Reviewing => "The work has been taken for review by the reviewer.",
            HomeworkStatus::Rejected => "The work has been reviewed: the reviewer has comments.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        HomeworkStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| BotError::data(format!("unknown homework status: {}", s)))
    }
}

/// Render the status-change notification for one homework record.
pub fn render_message(name: &str, status: HomeworkStatus) -> String {
    format!(
        "The status of the homework \"{}\" has changed. {}",
        name,
        status.verdict()
    )
}

/// Extract name and status from a raw homework record and render the
/// notification text.
///
/// Fails with a data error when the record is not an object, when
/// `homework_name` or `status` is missing (every missing key is named), or
/// when the status is not a known code.
pub fn parse_status(homework: &Value) -> Result<String> {
    tracing::debug!("Parsing homework status");

    let record = homework.as_object().ok_or_else(|| {
        BotError::data(format!(
            "expected homework to be an object, got {}",
            super::json_type_name(homework)
        ))
    })?;

    let missing: Vec<&str> = [HOMEWORK_NAME_KEY, STATUS_KEY]
        .into_iter()
        .filter(|key| !record.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(BotError::data(format!(
            "homework is missing key: {}",
            missing.join(", ")
        )));
    }

    let name = record[HOMEWORK_NAME_KEY].as_str().ok_or_else(|| {
        BotError::data(format!(
            "expected {} to be a string, got {}",
            HOMEWORK_NAME_KEY,
            super::json_type_name(&record[HOMEWORK_NAME_KEY])
        ))
    })?;

    let status: HomeworkStatus = match &record[STATUS_KEY] {
        Value::String(code) => code.parse()?,
        other => return Err(BotError::data(format!("unknown homework status: {}", other))),
    };

    Ok(render_message(name, status))
}
