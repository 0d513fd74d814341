use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use pactwatch_common::ContractRecord;
use pactwatch_ingest::IngestHook;
use pactwatch_notify::NotifyBackend;
use streamline_client::{ReviewOutcome, StreamlineClient};

/// Submits a newly recorded contract to the review service, then sends an
/// ingest receipt carrying the review outcome.
///
/// Best-effort on both sides; the record is already durably saved by the
/// time this runs.
pub struct ReviewAndNotifyHook {
    review: Option<StreamlineClient>,
    notifier: Arc<dyn NotifyBackend>,
}

impl ReviewAndNotifyHook {
    pub fn new(review: Option<StreamlineClient>, notifier: Arc<dyn NotifyBackend>) -> Self {
        Self { review, notifier }
    }
}

#[async_trait]
impl IngestHook for ReviewAndNotifyHook {
    async fn on_recorded(&self, record: &ContractRecord) {
        let review = match &self.review {
            Some(client) => {
                let outcome = client.review(&record.file_name).await;
                if outcome.is_error() {
                    warn!(id = %record.id, status = %outcome.status, "Review service reported an error");
                } else {
                    info!(id = %record.id, status = %outcome.status, "Review submitted");
                }
                outcome
            }
            None => ReviewOutcome {
                status: "skipped".to_string(),
                summary: None,
            },
        };

        if let Err(e) = self.notifier.send_ingest_receipt(record, &review).await {
            warn!(id = %record.id, error = %e, "Failed to send ingest receipt");
        }
    }
}
