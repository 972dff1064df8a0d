//! Messaging channel drivers, selected by configuration string.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{MessengerConfig, MESSENGER_DRIVER_TELEGRAM};
use crate::error::{ConfigError, NotifyError};

pub mod telegram;

pub use telegram::TelegramMessenger;

/// Delivers notifications to the single configured channel. The chart,
/// when present, always follows the text message as a separate attachment.
#[async_trait]
pub trait Messenger: Send + Sync + std::fmt::Debug {
    /// Deliver a text message; `markdown` requests emphasis formatting.
    async fn send_text(&self, text: &str, markdown: bool) -> Result<(), NotifyError>;

    /// Deliver a rendered PNG chart as a follow-up attachment.
    async fn send_chart(&self, caption: &str, png: Vec<u8>) -> Result<(), NotifyError>;
}

/// Build the messenger named by the configuration.
pub fn from_config(config: &MessengerConfig) -> Result<Arc<dyn Messenger>, ConfigError> {
    match config.driver.as_str() {
        MESSENGER_DRIVER_TELEGRAM => Ok(Arc::new(TelegramMessenger::new(&config.telegram)?)),
        other => Err(ConfigError::UnknownMessengerDriver(other.to_string())),
    }
}
