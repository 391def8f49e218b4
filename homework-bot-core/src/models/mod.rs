//! Data models for homework-bot

pub mod configuration;
pub mod homework;

pub use configuration::*;
pub use homework::*;

use serde_json::Value;

/// JSON type name used in validation messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
