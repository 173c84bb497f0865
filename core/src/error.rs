use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid die value: {value} (expected 1..=6)")]
    InvalidDieValue { value: u8 },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
