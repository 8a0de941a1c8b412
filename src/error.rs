//! Error types for the engine and store seams

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no source loaded")]
    NotLoaded,

    #[error("failed to load {uri}: {reason}")]
    Load { uri: String, reason: String },

    #[error("{operation} failed: {reason}")]
    Command {
        operation: &'static str,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
