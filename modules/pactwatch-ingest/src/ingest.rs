use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use pactwatch_common::{ContractRecord, InsertOutcome, PactwatchError};
use pactwatch_registry::ContractStore;

use crate::expiry_date::ExpiryDateExtractor;
use crate::text_extract::extract_text;

/// Fired after a candidate is durably recorded. Implementations log their
/// own failures; nothing a hook does can change the ingestion outcome.
#[async_trait]
pub trait IngestHook: Send + Sync {
    async fn on_recorded(&self, record: &ContractRecord);
}

/// Turns a raw document into a candidate record and attempts to admit it
/// to the registry.
pub struct Ingestor {
    store: ContractStore,
    extractor: Box<dyn ExpiryDateExtractor>,
    hooks: Vec<Arc<dyn IngestHook>>,
}

impl Ingestor {
    pub fn new(store: ContractStore, extractor: Box<dyn ExpiryDateExtractor>) -> Self {
        Self {
            store,
            extractor,
            hooks: Vec::new(),
        }
    }

    /// Register a post-insert hook (review submission, receipts).
    pub fn with_hook(mut self, hook: Arc<dyn IngestHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Extract an expiry date from the document and attempt to admit the
    /// resulting candidate.
    ///
    /// A blank id is rejected up front, and a document with no extractable
    /// expiry date aborts before the registry is touched. Hooks fire only
    /// for an accepted candidate.
    pub async fn ingest(&self, id: &str, path: &Path) -> Result<InsertOutcome, PactwatchError> {
        if id.trim().is_empty() {
            return Err(PactwatchError::Validation(
                "contract id must not be blank".to_string(),
            ));
        }

        let text = extract_text(path)?;
        let expiry_date = self.extractor.extract(&text).ok_or_else(|| {
            PactwatchError::UnparseableDocument(format!(
                "no expiry date found in {}",
                path.display()
            ))
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let candidate = ContractRecord::new(id, &file_name, expiry_date, Utc::now());

        let outcome = self.store.admit(candidate)?;
        match &outcome {
            InsertOutcome::Recorded(record) => {
                info!(
                    id = %record.id,
                    file = %record.file_name,
                    expiry = %record.expiry_date,
                    "Contract recorded"
                );
                for hook in &self.hooks {
                    hook.on_recorded(record).await;
                }
            }
            InsertOutcome::Duplicate { id } => {
                warn!(id = %id, "Duplicate contract, not saved");
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    use crate::expiry_date::FirstDateExtractor;

    struct CountingHook(AtomicUsize);

    #[async_trait]
    impl IngestHook for CountingHook {
        async fn on_recorded(&self, _record: &ContractRecord) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn ingestor(store_path: &Path) -> Ingestor {
        Ingestor::new(
            ContractStore::new(store_path),
            Box::new(FirstDateExtractor),
        )
    }

    #[tokio::test]
    async fn ingests_a_document_with_an_expiry_date() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("vendorA.txt");
        fs::write(&doc, "Valid until 2025-10-05 per terms").unwrap();

        let store_path = dir.path().join("contracts.jsonl");
        let outcome = ingestor(&store_path).ingest("001", &doc).await.unwrap();
        assert!(outcome.accepted());

        let records = ContractStore::new(&store_path).load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_name, "vendorA.txt");
        assert_eq!(records[0].expiry_date.to_string(), "2025-10-05");
    }

    #[tokio::test]
    async fn document_without_a_date_leaves_registry_untouched() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("nodate.txt");
        fs::write(&doc, "perpetual agreement, no end date").unwrap();

        let store_path = dir.path().join("contracts.jsonl");
        let err = ingestor(&store_path).ingest("001", &doc).await.unwrap_err();
        assert!(matches!(err, PactwatchError::UnparseableDocument(_)));
        assert!(ContractStore::new(&store_path).load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_id_reports_rejection() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("vendorA.txt");
        fs::write(&doc, "expires 2025-12-15").unwrap();

        let store_path = dir.path().join("contracts.jsonl");
        let ing = ingestor(&store_path);
        assert!(ing.ingest("001", &doc).await.unwrap().accepted());
        assert!(!ing.ingest("001", &doc).await.unwrap().accepted());

        assert_eq!(ContractStore::new(&store_path).load().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_id_is_rejected_up_front() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("vendorA.txt");
        fs::write(&doc, "expires 2025-12-15").unwrap();

        let err = ingestor(&dir.path().join("contracts.jsonl"))
            .ingest("  ", &doc)
            .await
            .unwrap_err();
        assert!(matches!(err, PactwatchError::Validation(_)));
    }

    #[tokio::test]
    async fn hooks_fire_for_accepted_candidates_only() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("vendorA.txt");
        fs::write(&doc, "expires 2025-12-15").unwrap();

        let hook = Arc::new(CountingHook(AtomicUsize::new(0)));
        let ing = ingestor(&dir.path().join("contracts.jsonl")).with_hook(hook.clone());

        ing.ingest("001", &doc).await.unwrap();
        assert_eq!(hook.0.load(Ordering::SeqCst), 1);

        // Duplicate: no hook.
        ing.ingest("001", &doc).await.unwrap();
        assert_eq!(hook.0.load(Ordering::SeqCst), 1);
    }
}
