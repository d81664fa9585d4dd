use async_trait::async_trait;
use serde_json::json;

use crate::config::MailConfig;
use crate::domain::errors::DomainError;
use crate::domain::ports::Mailer;

/// Transactional email through the Resend HTTP API.
#[derive(Clone)]
pub struct ResendMailer {
    http: reqwest::Client,
    config: MailConfig,
}

impl ResendMailer {
    pub fn new(config: MailConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), DomainError> {
        self.http
            .post(format!("{}/emails", self.config.api_base.trim_end_matches('/')))
            .bearer_auth(&self.config.api_key)
            .json(&json!({
                "from": self.config.from,
                "to": [to],
                "subject": subject,
                "html": html,
            }))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DomainError::Upstream(e.to_string()))?;

        log::info!("Email '{}' sent to {}", subject, to);
        Ok(())
    }
}
