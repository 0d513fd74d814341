use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use pactwatch_common::{ContractRecord, ExpiringContract, TelegramConfig};
use streamline_client::ReviewOutcome;

use crate::backend::NotifyBackend;

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Telegram Bot API notification channel.
pub struct TelegramChannel {
    bot_token: String,
    chat_id: String,
    http: reqwest::Client,
    base_url: String,
}

impl TelegramChannel {
    pub fn new(config: &TelegramConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
            http,
            base_url: TELEGRAM_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    async fn post(&self, text: String) -> anyhow::Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);
        let payload = json!({ "chat_id": self.chat_id, "text": text });

        let resp = self.http.post(&url).json(&payload).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Telegram API returned non-success");
            anyhow::bail!("Telegram API returned {status}");
        }

        Ok(())
    }
}

#[async_trait]
impl NotifyBackend for TelegramChannel {
    async fn send_expiry_warning(&self, expiring: &ExpiringContract) -> anyhow::Result<()> {
        let text = format!(
            "\u{26a0}\u{fe0f} Contract Expiring Soon\n\
             File: {}\n\
             Expiry date: {}\n\
             Days left: {}",
            expiring.record.file_name, expiring.record.expiry_date, expiring.days_left,
        );
        self.post(text).await
    }

    async fn send_ingest_receipt(
        &self,
        record: &ContractRecord,
        review: &ReviewOutcome,
    ) -> anyhow::Result<()> {
        let text = format!(
            "\u{2705} Contract Recorded\n\
             File: {}\n\
             ID: {}\n\
             Expiry date: {}\n\
             Review status: {}",
            record.file_name, record.id, record.expiry_date, review.status,
        );
        self.post(text).await
    }
}
