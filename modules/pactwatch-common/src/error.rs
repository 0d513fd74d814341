use thiserror::Error;

#[derive(Error, Debug)]
pub enum PactwatchError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Store lock conflict: another invocation holds the registry lock")]
    StoreLockConflict,

    #[error("Unparseable document: {0}")]
    UnparseableDocument(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl From<std::io::Error> for PactwatchError {
    fn from(err: std::io::Error) -> Self {
        PactwatchError::Storage(err.to_string())
    }
}
