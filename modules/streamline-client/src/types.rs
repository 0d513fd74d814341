use serde::{Deserialize, Serialize};

/// Status and summary pair returned by the review service.
///
/// The service reports failures as `{"status": "error", "message": ...}`,
/// hence the alias.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "message")]
    pub summary: Option<String>,
}

impl ReviewOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            summary: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}
