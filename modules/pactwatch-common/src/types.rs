use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One tracked contract document's metadata.
///
/// Wire field names match the store columns (`ContractID`, `FileName`,
/// `ExpiryDate`, `UploadedAt`). `expiry_date` is a calendar date with no
/// time component; `uploaded_at` is set once at creation and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    #[serde(rename = "ContractID")]
    pub id: String,

    #[serde(rename = "FileName")]
    pub file_name: String,

    #[serde(rename = "ExpiryDate")]
    pub expiry_date: NaiveDate,

    #[serde(rename = "UploadedAt")]
    pub uploaded_at: DateTime<Utc>,
}

impl ContractRecord {
    /// Pure construction; the caller supplies the upload timestamp.
    pub fn new(
        id: &str,
        file_name: &str,
        expiry_date: NaiveDate,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.to_string(),
            file_name: file_name.to_string(),
            expiry_date,
            uploaded_at,
        }
    }
}

/// Result of attempting to admit a candidate record to the registry.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    /// The candidate was appended and durably saved.
    Recorded(ContractRecord),
    /// A record with this id already exists; the registry is unchanged.
    Duplicate { id: String },
}

impl InsertOutcome {
    pub fn accepted(&self) -> bool {
        matches!(self, InsertOutcome::Recorded(_))
    }
}

/// A record flagged by the expiry sweep, annotated with the whole days
/// remaining relative to the reference date. Negative once expired.
#[derive(Debug, Clone)]
pub struct ExpiringContract {
    pub record: ContractRecord,
    pub days_left: i64,
}
