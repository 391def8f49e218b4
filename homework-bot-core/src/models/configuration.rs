//! Configuration data structures

use crate::error::{BotError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Practicum API token variable
pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
/// Telegram bot token variable
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
/// Target chat variable
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// All credential variables, in the order they are reported.
pub const CREDENTIAL_VARS: [&str; 3] =
    [PRACTICUM_TOKEN_VAR, TELEGRAM_TOKEN_VAR, TELEGRAM_CHAT_ID_VAR];

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Logging level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "debug")]
    #[default]
    Debug,
    #[serde(rename = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Non-secret settings. Credentials never live here, see [`Credentials`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Homework statuses endpoint
    pub endpoint: String,
    /// Pause between poll cycles, in seconds
    pub retry_period_secs: u64,
    /// Transport timeout for every outbound request, in seconds
    pub request_timeout_secs: u64,
    /// Telegram Bot API base URL
    pub telegram_api_base: String,
    /// Logging verbosity level
    pub log_level: LogLevel,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            retry_period_secs: DEFAULT_RETRY_PERIOD_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            log_level: LogLevel::default(),
        }
    }
}

impl Configuration {
    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| {
                BotError::configuration(format!("cannot read {}: {}", path.display(), e))
                    .with_source(e)
            })?;
            toml::from_str(&content).map_err(|e| {
                BotError::configuration(format!("cannot parse {}: {}", path.display(), e))
                    .with_source(e)
            })
        } else {
            // Return default configuration if file doesn't exist
            Ok(Configuration::default())
        }
    }

    /// Get the XDG config directory path
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BotError::configuration("could not determine config directory"))?;
        Ok(config_dir.join("homework-bot").join("config.toml"))
    }

    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !is_http_url(&self.endpoint) {
            errors.push(format!("endpoint must be an http(s) URL: {}", self.endpoint));
        }

        if !is_http_url(&self.telegram_api_base) {
            errors.push(format!(
                "telegram_api_base must be an http(s) URL: {}",
                self.telegram_api_base
            ));
        }

        if self.retry_period_secs == 0 || self.retry_period_secs > 86400 {
            errors.push("retry_period_secs must be between 1 and 86400".to_string());
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 600 {
            errors.push("request_timeout_secs must be between 1 and 600".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// The three secrets the bot needs to run.
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through `lookup`. Empty values count as missing; the
    /// error names every missing variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let values = CREDENTIAL_VARS.map(|name| lookup(name).filter(|v| !v.trim().is_empty()));

        match values {
            [Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)] => Ok(Self {
                practicum_token,
                telegram_token,
                telegram_chat_id,
            }),
            values => {
                let missing = missing_credentials(&values);
                let message =
                    format!("required variables are unavailable: {}", missing.join(", "));
                tracing::error!(missing = %missing.join(", "), "{}", message);
                Err(BotError::configuration(message))
            }
        }
    }

    /// Presence of each credential variable without exposing values.
    pub fn presence<F>(lookup: F) -> Vec<(&'static str, bool)>
    where
        F: Fn(&str) -> Option<String>,
    {
        CREDENTIAL_VARS
            .iter()
            .map(|&name| (name, lookup(name).is_some_and(|v| !v.trim().is_empty())))
            .collect()
    }
}

fn missing_credentials(values: &[Option<String>]) -> Vec<&'static str> {
    CREDENTIAL_VARS
        .iter()
        .zip(values)
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect()
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_configuration() {
        let config = Configuration::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.retry_period(), Duration::from_secs(600));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_configuration_validation() {
        let config = Configuration {
            endpoint: "not a url".to_string(),
            telegram_api_base: "ftp://example.com".to_string(),
            retry_period_secs: 0,
            request_timeout_secs: 601,
            ..Configuration::default()
        };

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.contains("endpoint")));
        assert!(errors.iter().any(|e| e.contains("telegram_api_base")));
        assert!(errors.iter().any(|e| e.contains("retry_period_secs")));
        assert!(errors.iter().any(|e| e.contains("request_timeout_secs")));
    }

    #[test]
    fn test_config_file_partial_overrides() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "retry_period_secs = 60\nlog_level = \"info\"\n").unwrap();

        let config = Configuration::load_from_file(&config_path).unwrap();
        assert_eq!(config.retry_period_secs, 60);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config = Configuration::load_from_file(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.retry_period_secs, DEFAULT_RETRY_PERIOD_SECS);
    }

    #[test]
    fn test_malformed_config_file_is_configuration_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "retry_period_secs = \"soon\"").unwrap();

        let err = Configuration::load_from_file(&config_path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_credentials_all_present() {
        let creds = Credentials::from_lookup(lookup_from(&[
            ("PRACTICUM_TOKEN", "p-token"),
            ("TELEGRAM_TOKEN", "t-token"),
            ("TELEGRAM_CHAT_ID", "42"),
        ]))
        .unwrap();
        assert_eq!(creds.practicum_token, "p-token");
        assert_eq!(creds.telegram_token, "t-token");
        assert_eq!(creds.telegram_chat_id, "42");
    }

    #[test]
    fn test_credentials_report_every_missing_variable() {
        let err = Credentials::from_lookup(lookup_from(&[
            ("TELEGRAM_TOKEN", "t-token"),
            ("TELEGRAM_CHAT_ID", "  "),
        ]))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.message().contains("PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"));
        assert!(!err.message().contains("TELEGRAM_TOKEN,"));
    }

    #[test]
    fn test_credentials_presence() {
        let presence = Credentials::presence(lookup_from(&[("PRACTICUM_TOKEN", "p")]));
        assert_eq!(
            presence,
            vec![
                ("PRACTICUM_TOKEN", true),
                ("TELEGRAM_TOKEN", false),
                ("TELEGRAM_CHAT_ID", false),
            ]
        );
    }

    #[test]
    fn test_credentials_debug_hides_tokens() {
        let creds = Credentials {
            practicum_token: "secret-p".into(),
            telegram_token: "secret-t".into(),
            telegram_chat_id: "42".into(),
        };
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret-p"));
        assert!(!debug.contains("secret-t"));
        assert!(debug.contains("42"));
    }
}
