//! Error type shared by every stage of the poll cycle
//!
//! A single tagged error: callers branch on [`BotError::kind`] instead of
//! matching distinct error types per stage.

use std::fmt;
use thiserror::Error;

/// Result type alias for homework-bot operations
pub type Result<T> = std::result::Result<T, BotError>;

type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Category of a [`BotError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Required credential missing or settings invalid (fatal, startup only)
    Configuration,
    /// Network-level failure reaching an endpoint
    Connectivity,
    /// Unexpected HTTP status, undecodable body or server-reported error
    Protocol,
    /// Malformed API response shape
    Validation,
    /// Malformed or unrecognized homework record
    Data,
    /// Failed to deliver an outbound notification
    Dispatch,
}

impl ErrorKind {
    /// Whether the poll loop keeps running after an error of this kind.
    pub fn is_recoverable(self) -> bool {
        !matches!(self, ErrorKind::Configuration)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Connectivity => "connectivity",
            ErrorKind::Protocol => "protocol",
            ErrorKind::Validation => "validation",
            ErrorKind::Data => "data",
            ErrorKind::Dispatch => "dispatch",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised by configuration loading, the API client, validation,
/// formatting or notification dispatch.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BotError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<Cause>,
}

impl BotError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl Into<Cause>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Connectivity, message)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Protocol, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Data, message)
    }

    pub fn dispatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Dispatch, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
