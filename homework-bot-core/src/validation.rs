//! Shape validation for homework status responses
//!
//! Only the envelope is checked here: the response must be an object holding a
//! `homeworks` array. Individual records are checked by
//! [`parse_status`](crate::models::parse_status).

use crate::error::{BotError, Result};
use crate::models::json_type_name;
use serde_json::Value;

pub const HOMEWORKS_KEY: &str = "homeworks";
pub const CURRENT_DATE_KEY: &str = "current_date";

/// Check that `response` is an object with a `homeworks` array.
pub fn check_response(response: &Value) -> Result<()> {
    tracing::debug!("Checking API response");

    let object = response.as_object().ok_or_else(|| {
        BotError::validation(format!(
            "expected response to be an object, got {}",
            json_type_name(response)
        ))
    })?;

    let homeworks = object.get(HOMEWORKS_KEY).ok_or_else(|| {
        BotError::validation(format!("response is missing key: {}", HOMEWORKS_KEY))
    })?;

    if !homeworks.is_array() {
        return Err(BotError::validation(format!(
            "expected {} to be an array, got {}",
            HOMEWORKS_KEY,
            json_type_name(homeworks)
        )));
    }

    Ok(())
}

/// First homework record of a validated response, if any.
pub fn latest_homework(response: &Value) -> Option<&Value> {
    response.get(HOMEWORKS_KEY)?.as_array()?.first()
}

/// Server-reported `current_date`; `None` when absent or not an integer.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get(CURRENT_DATE_KEY)?.as_i64()
}
