use thiserror::Error;

pub type Result<T> = std::result::Result<T, StreamlineError>;

#[derive(Debug, Error)]
pub enum StreamlineError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for StreamlineError {
    fn from(err: reqwest::Error) -> Self {
        StreamlineError::Network(err.to_string())
    }
}
