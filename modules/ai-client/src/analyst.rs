use anyhow::{anyhow, Result};
use tracing::warn;

use crate::openai::client::OpenAiClient;
use crate::openai::types::{ChatRequest, WireMessage};

const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Rough 4-chars-per-token guard at a 15k-token prompt budget.
const MAX_PROMPT_CHARS: usize = 60_000;

const SYSTEM_PROMPT: &str = "You are an assistant specialized in analyzing contract documents. \
    Provide a summary, the key points, potential risks, and the key clauses.";

/// Document-analysis assistant: summarizes contract text.
pub struct ContractAnalyst {
    client: OpenAiClient,
    model: String,
}

impl ContractAnalyst {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self {
            client: OpenAiClient::new(api_key),
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }

    /// Summarize contract text. Input beyond the prompt budget is
    /// truncated with a warning rather than rejected.
    pub async fn analyze(&self, contract_text: &str) -> Result<String> {
        let text = truncate_on_char_boundary(contract_text, MAX_PROMPT_CHARS);
        if text.len() < contract_text.len() {
            warn!(
                chars = contract_text.len(),
                kept = text.len(),
                "Document too long, analyzing a leading slice only"
            );
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                WireMessage::system(SYSTEM_PROMPT),
                WireMessage::user(format!(
                    "Please analyze the following contract document and give the key points, \
                     potential risks, and key clauses. Also summarize the essence of the \
                     contract.\n\nContract:\n{text}"
                )),
            ],
            temperature: Some(0.7),
            max_tokens: Some(1000),
        };

        let response = self.client.chat(&request).await?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow!("No analysis returned"))
    }
}

fn truncate_on_char_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
