use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use pactwatch_common::DateRule;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid regex"));

static KEYWORD_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:expires?|expiry|valid until|berlaku sampai)\D{0,40}(\d{4}-\d{2}-\d{2})")
        .expect("valid regex")
});

/// Derives an expiry date from extracted document text.
///
/// The registry admits whatever the extractor returns; swapping the rule
/// swaps the heuristic without touching ingestion.
pub trait ExpiryDateExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Option<NaiveDate>;
}

/// The documented heuristic: the first `YYYY-MM-DD`-shaped substring that
/// parses as a real calendar date, scanning left to right. A shaped token
/// that is not a valid date (`2025-99-99`) is passed over. The token is
/// not required to actually be an expiry date; an issue date earlier in
/// the text wins.
pub struct FirstDateExtractor;

impl ExpiryDateExtractor for FirstDateExtractor {
    fn extract(&self, text: &str) -> Option<NaiveDate> {
        DATE_RE
            .find_iter(text)
            .find_map(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok())
    }
}

/// Stricter rule: only a date following an expiry keyword counts.
pub struct KeywordDateExtractor;

impl ExpiryDateExtractor for KeywordDateExtractor {
    fn extract(&self, text: &str) -> Option<NaiveDate> {
        KEYWORD_DATE_RE
            .captures_iter(text)
            .find_map(|c| NaiveDate::parse_from_str(&c[1], "%Y-%m-%d").ok())
    }
}

pub fn extractor_for(rule: DateRule) -> Box<dyn ExpiryDateExtractor> {
    match rule {
        DateRule::First => Box::new(FirstDateExtractor),
        DateRule::Keyword => Box::new(KeywordDateExtractor),
    }
}
