use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlowdeckError>;

#[derive(Debug, Error)]
pub enum FlowdeckError {
    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
