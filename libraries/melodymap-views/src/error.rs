//! Error types for the dashboard views.

use melodymap_client::ClientError;
use melodymap_core::SessionError;
use thiserror::Error;

/// Message shown when a Home or Recommendations fetch cycle fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data. Please try again later.";

/// Message shown when the sign-in redirect carried no token.
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed. Please try again.";

/// Errors surfaced at the view boundary.
#[derive(Error, Debug)]
pub enum ViewError {
    /// A backend call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The sign-in redirect arrived without an `access_token`
    #[error("Sign-in callback carried no access token")]
    CallbackMissingToken,

    /// Reading or writing the session token failed
    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),
}

impl ViewError {
    /// The message a user sees for this error.
    ///
    /// Backend and session failures collapse into one generic message.
    pub fn user_message(&self) -> &'static str {
        match self {
            ViewError::CallbackMissingToken => AUTH_FAILED_MESSAGE,
            ViewError::Client(_) | ViewError::Session(_) => FETCH_FAILED_MESSAGE,
        }
    }
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;
