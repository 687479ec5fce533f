//! Error types for the MelodyMap client.

use melodymap_core::SessionError;
use thiserror::Error;

/// Errors that can occur when talking to the MelodyMap backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No session token is stored; no request was sent
    #[error("Not signed in")]
    Unauthenticated,

    /// The backend rejected the token and refreshing it failed
    #[error("Session expired")]
    SessionExpired,

    /// Backend answered with a non-success status
    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failed to parse a backend response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid backend URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Reading or writing the session token failed
    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
