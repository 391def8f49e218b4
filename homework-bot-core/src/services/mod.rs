//! Logging and notification services

pub mod logging;
pub mod notifier;

pub use notifier::Notifier;
