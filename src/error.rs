// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("node not found: {0}")]
    NotFound(String),

    #[error("malformed record '{entry}': {reason}")]
    MalformedRecord { entry: String, reason: String },

    #[error("invalid chart configuration: {0}")]
    InvalidChart(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("not a graph snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot encoding error: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl GraphError {
    /// Missing-node errors are "nothing to show" for callers, not failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GraphError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
