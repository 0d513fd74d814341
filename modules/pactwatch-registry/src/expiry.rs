use chrono::NaiveDate;

use pactwatch_common::{ContractRecord, ExpiringContract};

/// Partition the registry by remaining time-to-expiry.
///
/// Pure filter-and-annotate: `days_left` is the whole-day difference
/// between a record's expiry date and `reference_date` (negative once
/// expired), and only records with `days_left <= threshold_days` come
/// back, in input order. Never mutates the registry and never dispatches
/// notifications; the caller decides what to do with the flagged records.
pub fn classify(
    records: &[ContractRecord],
    reference_date: NaiveDate,
    threshold_days: i64,
) -> Vec<ExpiringContract> {
    records
        .iter()
        .filter_map(|record| {
            let days_left = (record.expiry_date - reference_date).num_days();
            (days_left <= threshold_days).then(|| ExpiringContract {
                record: record.clone(),
                days_left,
            })
        })
        .collect()
}
