//! Communication providers: outbound notification delivery

mod sink;
mod telegram;

pub use sink::NotificationSink;
pub use telegram::TelegramSink;
