//! Route guard for protected pages.

use crate::error::Result;
use crate::navigator::Navigator;
use melodymap_core::{Route, SessionStore};
use std::sync::Arc;
use tracing::debug;

/// Where the guard stands for the current route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    /// Session not read yet; nothing is rendered
    #[default]
    Checking,
    /// A token is stored; wrapped content is rendered
    Authenticated,
    /// No token; the visitor is being sent to the entry page
    Redirecting,
}

/// Gates protected content on the presence of a session token.
///
/// Only presence is checked. A stored token that the backend would reject
/// still passes; the first failing fetch deals with that.
pub struct RouteGuard {
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    state: GuardState,
}

impl RouteGuard {
    /// Create a guard in the `Checking` state.
    pub fn new(session: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            session,
            navigator,
            state: GuardState::Checking,
        }
    }

    /// Current state.
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Read the session and settle on `Authenticated` or `Redirecting`.
    ///
    /// Redirecting pushes the entry route on the navigator.
    pub async fn check(&mut self) -> Result<GuardState> {
        self.state = GuardState::Checking;
        let token = self.session.get().await?;

        self.state = if token.is_some() {
            GuardState::Authenticated
        } else {
            debug!("No session token, redirecting to entry");
            self.navigator.push(Route::Entry);
            GuardState::Redirecting
        };

        Ok(self.state)
    }

    /// Re-run the check after the active route changed.
    pub async fn on_route_change(&mut self, route: Route) -> Result<GuardState> {
        debug!(route = %route, "Route changed, re-checking session");
        self.check().await
    }

    /// Hand `content` back only when the guard is `Authenticated`.
    pub fn reveal<T>(&self, content: T) -> Option<T> {
        match self.state {
            GuardState::Authenticated => Some(content),
            GuardState::Checking | GuardState::Redirecting => None,
        }
    }
}
