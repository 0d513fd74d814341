// JSON Lines persistence for the contract registry.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use pactwatch_common::{ContractRecord, InsertOutcome, PactwatchError};

use crate::lock::StoreLock;

/// Durable, insertion-ordered collection of contract records backed by a
/// JSON Lines file, one record per line. An absent file is the empty
/// registry. Records are never edited or deleted here; the only mutation
/// is appending an accepted candidate.
pub struct ContractStore {
    path: PathBuf,
}

impl ContractStore {
    /// No I/O happens until the first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full registry in insertion order.
    ///
    /// Each line parses independently; a malformed line (bad JSON or an
    /// expiry date that is not a valid `YYYY-MM-DD`) is skipped with a
    /// warning so one bad row never blocks a sweep. Only I/O failure is an
    /// error.
    pub fn load(&self) -> Result<Vec<ContractRecord>, PactwatchError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        let mut records = Vec::new();
        for (idx, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ContractRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(line = idx + 1, error = %e, "Skipping malformed stored record"),
            }
        }
        Ok(records)
    }

    /// Replace the store content with `records`.
    ///
    /// Writes to a dot-prefixed temp sibling, syncs, then renames over the
    /// target, so a crash mid-save leaves the previous store intact.
    pub fn save(&self, records: &[ContractRecord]) -> Result<(), PactwatchError> {
        let mut content = String::new();
        for record in records {
            let line = serde_json::to_string(record)
                .map_err(|e| PactwatchError::Storage(e.to_string()))?;
            content.push_str(&line);
            content.push('\n');
        }

        let temp_path = self.temp_path();
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// Append `candidate` unless its id is already present.
    ///
    /// Pure: no I/O, no side effects. On rejection the sequence comes back
    /// unmodified and the flag is false.
    pub fn insert(
        mut records: Vec<ContractRecord>,
        candidate: ContractRecord,
    ) -> (Vec<ContractRecord>, bool) {
        if records.iter().any(|r| r.id == candidate.id) {
            return (records, false);
        }
        records.push(candidate);
        (records, true)
    }

    /// The guarded load-mutate-save cycle. Holds the store lock across the
    /// whole sequence; saves only when the candidate is accepted.
    pub fn admit(&self, candidate: ContractRecord) -> Result<InsertOutcome, PactwatchError> {
        let _lock = StoreLock::acquire(&self.path)?;

        let records = self.load()?;
        let (records, accepted) = Self::insert(records, candidate.clone());
        if !accepted {
            return Ok(InsertOutcome::Duplicate { id: candidate.id });
        }
        self.save(&records)?;
        Ok(InsertOutcome::Recorded(candidate))
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store".to_string());
        self.path.with_file_name(format!(".{file_name}.tmp"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::tempdir;

    fn record(id: &str, file_name: &str, expiry: &str) -> ContractRecord {
        ContractRecord::new(
            id,
            file_name,
            NaiveDate::parse_from_str(expiry, "%Y-%m-%d").unwrap(),
            Utc.with_ymd_and_hms(2025, 9, 1, 8, 30, 0).unwrap(),
        )
    }

    #[test]
    fn absent_store_loads_empty() {
        let dir = tempdir().unwrap();
        let store = ContractStore::new(dir.path().join("contracts.jsonl"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn admit_into_empty_registry() {
        let dir = tempdir().unwrap();
        let store = ContractStore::new(dir.path().join("contracts.jsonl"));

        let outcome = store
            .admit(record("001", "vendorA.pdf", "2025-12-15"))
            .unwrap();
        assert!(outcome.accepted());

        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "001");
        assert_eq!(records[0].file_name, "vendorA.pdf");
    }

    #[test]
    fn duplicate_id_is_rejected_and_registry_unchanged() {
        let dir = tempdir().unwrap();
        let store = ContractStore::new(dir.path().join("contracts.jsonl"));

        store
            .admit(record("001", "vendorA.pdf", "2025-12-15"))
            .unwrap();
        let before = store.load().unwrap();

        let outcome = store
            .admit(record("001", "vendorA_v2.pdf", "2026-01-01"))
            .unwrap();
        assert!(!outcome.accepted());

        let after = store.load().unwrap();
        assert_eq!(after, before);
        assert_eq!(after[0].file_name, "vendorA.pdf");
    }

    #[test]
    fn insert_is_pure_and_order_preserving() {
        let records = vec![record("001", "a.pdf", "2025-12-15")];

        let (records, accepted) = ContractStore::insert(records, record("002", "b.pdf", "2025-10-05"));
        assert!(accepted);
        assert_eq!(
            records.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            ["001", "002"]
        );

        let (records, accepted) = ContractStore::insert(records, record("002", "dup.pdf", "2026-01-01"));
        assert!(!accepted);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn save_load_round_trip_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = ContractStore::new(dir.path().join("contracts.jsonl"));

        store
            .save(&[
                record("001", "vendorA.pdf", "2025-12-15"),
                record("002", "vendorB.pdf", "2025-10-05"),
            ])
            .unwrap();

        let first = fs::read_to_string(store.path()).unwrap();
        store.save(&store.load().unwrap()).unwrap();
        let second = fs::read_to_string(store.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_line_is_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contracts.jsonl");
        let store = ContractStore::new(&path);

        store.save(&[record("001", "vendorA.pdf", "2025-12-15")]).unwrap();
        let mut raw = fs::read_to_string(&path).unwrap();
        raw.push_str("{\"ContractID\":\"002\",\"FileName\":\"bad.pdf\",\"ExpiryDate\":\"not-a-date\",\"UploadedAt\":\"2025-09-01T08:30:00Z\"}\n");
        raw.push_str("not json at all\n");
        fs::write(&path, raw).unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "001");
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = tempdir().unwrap();
        let store = ContractStore::new(dir.path().join("contracts.jsonl"));

        store.save(&[record("001", "vendorA.pdf", "2025-12-15")]).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn admit_releases_lock_on_duplicate() {
        let dir = tempdir().unwrap();
        let store = ContractStore::new(dir.path().join("contracts.jsonl"));

        store.admit(record("001", "a.pdf", "2025-12-15")).unwrap();
        store.admit(record("001", "a.pdf", "2025-12-15")).unwrap();
        // A stale lock would make this third cycle fail.
        let outcome = store.admit(record("002", "b.pdf", "2025-10-05")).unwrap();
        assert!(outcome.accepted());
    }
}
