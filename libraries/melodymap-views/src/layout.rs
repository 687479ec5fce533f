//! Layout shell around every page.
//!
//! What the shell shows is a pure function of the active route and whether
//! a session token is stored. [`LayoutShell`] re-reads the latter on every
//! route change and carries out the sign-in and sign-out actions.

use crate::error::Result;
use crate::navigator::Navigator;
use melodymap_core::{Route, SessionStore};
use std::sync::Arc;
use tracing::info;

/// An action button offered by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutAction {
    /// Start the OAuth flow
    SignIn,
    /// Forget the session token
    SignOut,
}

impl LayoutAction {
    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            LayoutAction::SignIn => "Sign In",
            LayoutAction::SignOut => "Sign Out",
        }
    }
}

/// Navigation affordances for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Route the layout was computed for
    pub route: Route,
    /// Whether a session token was present
    pub authenticated: bool,
    /// Header button, if any
    pub header_action: Option<LayoutAction>,
    /// Side navigation button
    pub nav_action: LayoutAction,
    /// Links to protected pages
    pub links: Vec<Route>,
}

/// Compute the layout for `route`.
pub fn layout_for(route: Route, authenticated: bool) -> Layout {
    let on_protected = route.is_protected() && authenticated;

    let header_action = if route == Route::Entry {
        Some(LayoutAction::SignIn)
    } else if on_protected {
        Some(LayoutAction::SignOut)
    } else {
        None
    };

    let nav_action = if authenticated {
        LayoutAction::SignOut
    } else {
        LayoutAction::SignIn
    };

    let links = if on_protected {
        Route::protected_routes().to_vec()
    } else {
        Vec::new()
    };

    Layout {
        route,
        authenticated,
        header_action,
        nav_action,
        links,
    }
}

/// Stateful wrapper that reads the session and performs shell actions.
pub struct LayoutShell {
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    login_url: String,
}

impl LayoutShell {
    /// Create a shell that sends sign-ins to `login_url`.
    pub fn new(
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        login_url: impl Into<String>,
    ) -> Self {
        Self {
            session,
            navigator,
            login_url: login_url.into(),
        }
    }

    /// Layout for `route` given the session as stored right now.
    pub async fn layout(&self, route: Route) -> Result<Layout> {
        let authenticated = self.session.is_authenticated().await?;
        Ok(layout_for(route, authenticated))
    }

    /// Perform `action`.
    pub async fn activate(&self, action: LayoutAction) -> Result<()> {
        match action {
            LayoutAction::SignIn => {
                self.sign_in();
                Ok(())
            }
            LayoutAction::SignOut => self.sign_out().await,
        }
    }

    /// Redirect to the backend's login endpoint.
    pub fn sign_in(&self) {
        self.navigator.redirect(&self.login_url);
    }

    /// Clear the session token and go to the entry page.
    ///
    /// Nothing is sent to the backend.
    pub async fn sign_out(&self) -> Result<()> {
        self.session.clear().await?;
        info!("Signed out");
        self.navigator.push(Route::Entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::MockNavigator;
    use melodymap_core::MemorySessionStore;
    use mockall::predicate::eq;

    const LOGIN: &str = "http://127.0.0.1:8000/auth/login";

    #[test]
    fn test_entry_route_offers_sign_in() {
        let layout = layout_for(Route::Entry, false);
        assert_eq!(layout.header_action, Some(LayoutAction::SignIn));
        assert_eq!(layout.nav_action, LayoutAction::SignIn);
        assert!(layout.links.is_empty());

        let signed_in = layout_for(Route::Entry, true);
        assert_eq!(signed_in.header_action, Some(LayoutAction::SignIn));
        assert_eq!(signed_in.nav_action, LayoutAction::SignOut);
    }

    #[test]
    fn test_protected_route_when_authenticated() {
        let layout = layout_for(Route::Home, true);
        assert_eq!(layout.header_action, Some(LayoutAction::SignOut));
        assert_eq!(layout.links, vec![Route::Home, Route::Recommendations]);
    }

    #[test]
    fn test_protected_route_without_session() {
        let layout = layout_for(Route::Recommendations, false);
        assert_eq!(layout.header_action, None);
        assert_eq!(layout.nav_action, LayoutAction::SignIn);
        assert!(layout.links.is_empty());
    }

    #[test]
    fn test_callback_route_has_no_header_action() {
        assert_eq!(layout_for(Route::Callback, true).header_action, None);
    }

    #[tokio::test]
    async fn test_sign_in_redirects_to_login() {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_redirect()
            .withf(|url| url.to_string() == LOGIN)
            .times(1)
            .return_const(());

        let shell = LayoutShell::new(
            Arc::new(MemorySessionStore::new()),
            Arc::new(navigator),
            LOGIN,
        );
        shell.activate(LayoutAction::SignIn).await.unwrap();
    }

    #[tokio::test]
    async fn test_sign_out_clears_token_and_goes_to_entry() {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_push()
            .with(eq(Route::Entry))
            .times(1)
            .return_const(());

        let store = Arc::new(MemorySessionStore::with_token("abc"));
        let shell = LayoutShell::new(store.clone(), Arc::new(navigator), LOGIN);

        assert!(shell.layout(Route::Home).await.unwrap().authenticated);
        shell.activate(LayoutAction::SignOut).await.unwrap();

        assert!(store.get().await.unwrap().is_none());
        assert!(!shell.layout(Route::Home).await.unwrap().authenticated);
    }
}
