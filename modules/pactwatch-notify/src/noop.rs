use async_trait::async_trait;

use pactwatch_common::{ContractRecord, ExpiringContract};
use streamline_client::ReviewOutcome;

use crate::backend::NotifyBackend;

/// No-op notification backend for tests and unconfigured environments.
pub struct NoopBackend;

#[async_trait]
impl NotifyBackend for NoopBackend {
    async fn send_expiry_warning(&self, _expiring: &ExpiringContract) -> anyhow::Result<()> {
        Ok(())
    }

    async fn send_ingest_receipt(
        &self,
        _record: &ContractRecord,
        _review: &ReviewOutcome,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}
