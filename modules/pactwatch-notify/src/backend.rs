use async_trait::async_trait;

use pactwatch_common::{ContractRecord, ExpiringContract};
use streamline_client::ReviewOutcome;

/// Pluggable notification channel.
///
/// Delivery is best-effort: implementations report failure to the router,
/// which logs and moves on. Nothing here can affect an ingestion outcome.
#[async_trait]
pub trait NotifyBackend: Send + Sync {
    /// One warning per contract flagged by the expiry sweep.
    async fn send_expiry_warning(&self, expiring: &ExpiringContract) -> anyhow::Result<()>;

    /// Receipt for a newly recorded contract, with its review outcome.
    async fn send_ingest_receipt(
        &self,
        record: &ContractRecord,
        review: &ReviewOutcome,
    ) -> anyhow::Result<()>;
}
