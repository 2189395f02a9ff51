use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("Permalink already exists: {0}")]
    DuplicateKey(String),

    #[error("No record found for permalink: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, BlogError>;
