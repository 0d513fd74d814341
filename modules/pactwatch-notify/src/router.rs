use async_trait::async_trait;
use tracing::warn;

use pactwatch_common::{Config, ContractRecord, ExpiringContract};
use streamline_client::ReviewOutcome;

use crate::backend::NotifyBackend;
use crate::email::EmailChannel;
use crate::telegram::TelegramChannel;

/// Fans a notification out to every configured channel.
///
/// Delivery failures are logged per channel and swallowed; a channel
/// outage never unwinds past the notify boundary.
pub struct NotifyRouter {
    channels: Vec<(&'static str, Box<dyn NotifyBackend>)>,
}

impl NotifyRouter {
    /// Build a router from configuration. `None` when no channel is
    /// configured, so callers can fall back to `NoopBackend`.
    pub fn from_config(config: &Config) -> Option<Self> {
        let mut channels: Vec<(&'static str, Box<dyn NotifyBackend>)> = Vec::new();

        if let Some(telegram) = &config.telegram {
            channels.push(("telegram", Box::new(TelegramChannel::new(telegram))));
        }
        if let Some(smtp) = &config.smtp {
            match EmailChannel::new(smtp) {
                Ok(email) => channels.push(("email", Box::new(email))),
                Err(e) => warn!(error = %e, "Email channel misconfigured, skipping"),
            }
        }

        if channels.is_empty() {
            None
        } else {
            Some(Self { channels })
        }
    }
}

#[async_trait]
impl NotifyBackend for NotifyRouter {
    async fn send_expiry_warning(&self, expiring: &ExpiringContract) -> anyhow::Result<()> {
        for (name, channel) in &self.channels {
            if let Err(e) = channel.send_expiry_warning(expiring).await {
                warn!(
                    channel = name,
                    id = %expiring.record.id,
                    error = %e,
                    "Failed to send expiry warning"
                );
            }
        }
        Ok(())
    }

    async fn send_ingest_receipt(
        &self,
        record: &ContractRecord,
        review: &ReviewOutcome,
    ) -> anyhow::Result<()> {
        for (name, channel) in &self.channels {
            if let Err(e) = channel.send_ingest_receipt(record, review).await {
                warn!(
                    channel = name,
                    id = %record.id,
                    error = %e,
                    "Failed to send ingest receipt"
                );
            }
        }
        Ok(())
    }
}
