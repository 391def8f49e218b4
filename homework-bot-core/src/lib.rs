//! # Homework Bot Core Library
//!
//! Polls the Practicum homework statuses API and relays status changes of the
//! latest submission to a Telegram chat.

pub mod client;
pub mod error;
pub mod models;
pub mod poller;
pub mod providers;
pub mod services;
pub mod validation;

pub use error::{BotError, ErrorKind, Result};
