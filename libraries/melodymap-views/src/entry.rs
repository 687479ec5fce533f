//! Entry page with the sign-in call to action.

use crate::navigator::Navigator;
use std::sync::Arc;

/// Page title
pub const ENTRY_TITLE: &str = "Welcome to MelodyMap";
/// Prompt under the title
pub const ENTRY_PROMPT: &str = "Connect your Spotify account to get started";
/// Sign-in button label
pub const SIGN_IN_LABEL: &str = "Sign in with Spotify";

/// Landing page controller.
pub struct EntryView {
    navigator: Arc<dyn Navigator>,
    login_url: String,
    is_loading: bool,
}

impl EntryView {
    /// Create the view; `login_url` is the backend's `/auth/login`.
    pub fn new(navigator: Arc<dyn Navigator>, login_url: impl Into<String>) -> Self {
        Self {
            navigator,
            login_url: login_url.into(),
            is_loading: false,
        }
    }

    /// Whether the sign-in button shows its loading state
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Where sign-in sends the browser
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Activate the sign-in button.
    pub fn sign_in(&mut self) {
        self.is_loading = true;
        self.navigator.redirect(&self.login_url);
    }
}
