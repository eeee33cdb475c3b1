//! Error types for the session store.

use thiserror::Error;

/// Errors surfaced by session store operations.
///
/// Only persisting the table can fail. Reads never error: a missing or
/// unreadable table is treated as empty by the backends.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for session store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
