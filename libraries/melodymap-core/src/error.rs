/// Core error types for MelodyMap
use thiserror::Error;

/// Result type alias using `SessionError`
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors raised by a session store backend
#[derive(Error, Debug)]
pub enum SessionError {
    /// I/O errors from a file-backed store
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted session document could not be encoded or decoded
    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Attempted to persist an empty token
    #[error("Refusing to store an empty session token")]
    EmptyToken,
}
