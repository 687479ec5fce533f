//! Target of the OAuth redirect.
//!
//! The backend sends the browser here with the session token in the
//! `access_token` query parameter. The view stores it and moves on to the
//! home page, or shows a terminal error when it is missing.

use crate::error::{Result, ViewError, AUTH_FAILED_MESSAGE};
use crate::navigator::Navigator;
use melodymap_core::{Route, SessionStore, SESSION_TOKEN_KEY};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Message shown while the redirect is handled.
pub const PROCESSING_MESSAGE: &str = "Processing your sign in...";

/// Where the callback page stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallbackState {
    /// Waiting for, or handling, the redirect
    #[default]
    Processing,
    /// Token stored; navigation to home requested
    Completed,
    /// No usable token; nothing further happens
    Failed,
}

impl CallbackState {
    /// Text the page shows in this state
    pub fn message(&self) -> Option<&'static str> {
        match self {
            CallbackState::Processing => Some(PROCESSING_MESSAGE),
            CallbackState::Completed => None,
            CallbackState::Failed => Some(AUTH_FAILED_MESSAGE),
        }
    }
}

/// Pull the `access_token` parameter out of an incoming redirect.
///
/// Accepts a full URL (`http://host/callback?access_token=..`), a path with
/// a query (`/callback?access_token=..`), or a bare query string with or
/// without the leading `?`. An empty value counts as missing, and so does
/// a redirect that landed on any path other than the callback route.
pub fn extract_access_token(incoming: &str) -> Option<String> {
    let parsed = parse_incoming(incoming.trim())?;
    if Route::from_path(parsed.path()) != Some(Route::Callback) {
        warn!(path = %parsed.path(), "Redirect did not target the callback route");
        return None;
    }

    parsed
        .query_pairs()
        .find(|(k, _)| k == SESSION_TOKEN_KEY)
        .map(|(_, v)| v.to_string())
        .filter(|token| !token.is_empty())
}

fn parse_incoming(incoming: &str) -> Option<Url> {
    if let Ok(url) = Url::parse(incoming) {
        return Some(url);
    }

    let base = Url::parse("http://localhost/callback").ok()?;
    if incoming.starts_with('/') || incoming.starts_with('?') {
        base.join(incoming).ok()
    } else {
        base.join(&format!("?{}", incoming)).ok()
    }
}

/// Callback page controller.
pub struct CallbackView {
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    state: CallbackState,
}

impl CallbackView {
    /// Create the view in the `Processing` state.
    pub fn new(session: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            session,
            navigator,
            state: CallbackState::Processing,
        }
    }

    /// Current state
    pub fn state(&self) -> CallbackState {
        self.state
    }

    /// Handle the redirect that landed on this page.
    ///
    /// On success the token is stored and home is pushed. A missing token
    /// leaves the session untouched and fails with
    /// [`ViewError::CallbackMissingToken`]; there is no retry.
    pub async fn handle(&mut self, incoming: &str) -> Result<()> {
        let Some(token) = extract_access_token(incoming) else {
            warn!("Sign-in callback without access token");
            self.state = CallbackState::Failed;
            return Err(ViewError::CallbackMissingToken);
        };

        debug!("Storing session token from callback");
        if let Err(e) = self.session.set(&token).await {
            self.state = CallbackState::Failed;
            return Err(e.into());
        }

        info!("Signed in");
        self.state = CallbackState::Completed;
        self.navigator.push(Route::Home);
        Ok(())
    }
}
