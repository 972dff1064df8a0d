//! Telegram Bot API driver.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::config::TelegramConfig;
use crate::error::{ConfigError, NotifyError};

use super::Messenger;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub struct TelegramMessenger {
    http_client: reqwest::Client,
    base_url: String,
    token: String,
    chat_id: i64,
}

/// Envelope every Bot API call answers with. On failure `ok` is false and
/// `description` explains why (including invalid-token 401s).
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramMessenger {
    const DEFAULT_BASE_URL: &'static str = "https://api.telegram.org";

    pub fn new(config: &TelegramConfig) -> Result<Self, ConfigError> {
        Self::with_base_url(config, Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a driver against a custom API host (for testing).
    pub fn with_base_url(config: &TelegramConfig, base_url: String) -> Result<Self, ConfigError> {
        let http_client = reqwest::Client::builder().timeout(SEND_TIMEOUT).build()?;
        Ok(Self {
            http_client,
            base_url,
            token: config.token.clone(),
            chat_id: config.chat_id,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn check_response(response: reqwest::Response) -> Result<(), NotifyError> {
        let status = response.status();
        let api: ApiResponse = response.json().await?;
        if !api.ok {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                description: api
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, text: &str, markdown: bool) -> Result<(), NotifyError> {
        info!("sending message to telegram: {}", text.replace('\n', " "));

        let mut payload = json!({
            "chat_id": self.chat_id,
            "text": text,
        });
        if markdown {
            payload["parse_mode"] = json!("MarkdownV2");
        }

        let response = self
            .http_client
            .post(self.method_url("sendMessage"))
            .json(&payload)
            .send()
            .await?;
        Self::check_response(response).await
    }

    async fn send_chart(&self, caption: &str, png: Vec<u8>) -> Result<(), NotifyError> {
        info!(bytes = png.len(), "sending chart to telegram");

        let photo = multipart::Part::bytes(png)
            .file_name("chart.png")
            .mime_str("image/png")?;
        let form = multipart::Form::new()
            .text("chat_id", self.chat_id.to_string())
            .text("caption", caption.to_string())
            .part("photo", photo);

        let response = self
            .http_client
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await?;
        Self::check_response(response).await
    }
}
