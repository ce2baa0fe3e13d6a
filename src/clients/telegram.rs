use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use crate::{
    clients::Notifier,
    config::Config,
    models::{
        delivery::DeliveryResult,
        telegram::{ParseMode, SendMessageRequest, TelegramResponse},
    },
};

pub const SEND_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TelegramClient {
    http_client: Client,
    api_url: String,
    bot_token: Option<String>,
    chat_id: Option<String>,
}

impl TelegramClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|_| anyhow!("Failed to create HTTP client"))?;

        info!(
            api_url = %config.telegram_api_url,
            configured = config.telegram_bot_token.is_some() && config.telegram_chat_id.is_some(),
            "Telegram client initialized"
        );

        Ok(Self {
            http_client,
            api_url: config.telegram_api_url.clone(),
            bot_token: config.telegram_bot_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
        })
    }

    async fn send_message(&self, bot_token: &str, chat_id: &str, text: &str) -> Result<(), Error> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, bot_token);

        let request = SendMessageRequest {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            parse_mode: ParseMode::Html,
        };

        // reqwest errors carry the request URL, which embeds the bot token.
        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Telegram request failed: {}", e.without_url()))?;

        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let description = serde_json::from_str::<TelegramResponse>(&body)
            .ok()
            .and_then(|r| r.description)
            .unwrap_or(body);

        Err(anyhow!(
            "Telegram API returned status {}: {}",
            status,
            description
        ))
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn send(&self, text: &str) -> DeliveryResult {
        let (Some(bot_token), Some(chat_id)) = (self.bot_token.as_deref(), self.chat_id.as_deref())
        else {
            error!("TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID is not configured");
            return DeliveryResult::failure("Telegram notifier is not configured");
        };

        debug!(chat_id, length = text.len(), "Sending Telegram notification");

        match self.send_message(bot_token, chat_id, text).await {
            Ok(()) => {
                info!(chat_id, "Telegram notification sent successfully");
                DeliveryResult::success()
            }
            Err(e) => {
                error!(chat_id, error = %e, "Failed to send Telegram notification");
                DeliveryResult::failure(e.to_string())
            }
        }
    }

    fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }
}
