pub mod error;
pub mod types;

pub use error::{Result, StreamlineError};
pub use types::ReviewOutcome;

use std::time::Duration;

use tracing::warn;

/// Client for the external Streamline contract review service.
pub struct StreamlineClient {
    client: reqwest::Client,
    review_url: String,
}

impl StreamlineClient {
    pub fn new(review_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            review_url: review_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit a document for review.
    async fn submit(&self, file_name: &str) -> Result<ReviewOutcome> {
        let body = serde_json::json!({ "file": file_name });

        let resp = self
            .client
            .post(&self.review_url)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(StreamlineError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Submit a document for review, failing closed.
    ///
    /// Any transport or API error becomes an error-status outcome instead
    /// of propagating past the review boundary, so a review outage can
    /// never block ingestion.
    pub async fn review(&self, file_name: &str) -> ReviewOutcome {
        match self.submit(file_name).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(file = %file_name, error = %e, "Review submission failed");
                ReviewOutcome::error(e.to_string())
            }
        }
    }
}
