use async_trait::async_trait;
use serde_json::json;

use crate::config::TelegramConfig;
use crate::domain::errors::DomainError;
use crate::domain::ports::OrderNotifier;

/// Posts operator notifications to a Telegram chat through the Bot API.
#[derive(Clone)]
pub struct TelegramNotifier {
    http: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl OrderNotifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), DomainError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token
        );

        self.http
            .post(url)
            .json(&json!({ "chat_id": self.config.chat_id, "text": message }))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            // The bot token is part of the URL.
            .map_err(|e| DomainError::Upstream(e.without_url().to_string()))?;

        Ok(())
    }
}
