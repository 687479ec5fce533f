//! Navigation seam between the views and their host.
//!
//! Views never change the active page themselves. They ask a [`Navigator`]
//! to push a client-side route or to leave the dashboard for an external
//! URL, and the host decides what that means.

use melodymap_core::Route;
use std::sync::Mutex;
use tracing::debug;

/// A navigation requested by a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Client-side move to another dashboard route
    Internal(Route),
    /// Full redirect to a URL outside the dashboard
    External(String),
}

/// Receives navigation requests from views.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Move to another dashboard route
    fn push(&self, route: Route);

    /// Leave the dashboard for `url`
    fn redirect(&self, url: &str);
}

/// Navigator that queues requests for the host to act on.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    pending: Mutex<Vec<Navigation>>,
}

impl HistoryNavigator {
    /// Create an empty navigator
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every queued navigation, oldest first
    pub fn drain(&self) -> Vec<Navigation> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Navigation>> {
        self.pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, route: Route) {
        debug!(route = %route, "Navigation requested");
        self.lock().push(Navigation::Internal(route));
    }

    fn redirect(&self, url: &str) {
        debug!(url = %url, "External redirect requested");
        self.lock().push(Navigation::External(url.to_string()));
    }
}
