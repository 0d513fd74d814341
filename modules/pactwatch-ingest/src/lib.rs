pub mod expiry_date;
pub mod ingest;
pub mod text_extract;

pub use expiry_date::{extractor_for, ExpiryDateExtractor, FirstDateExtractor, KeywordDateExtractor};
pub use ingest::{IngestHook, Ingestor};
pub use text_extract::extract_text;
