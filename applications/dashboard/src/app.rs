//! Terminal host for the dashboard pages.
//!
//! [`Dashboard`] plays the browser: it owns the session file, mounts the
//! page for a request, follows the client-side navigations the page asks
//! for, and stops at the first external redirect.

use crate::config::DashboardConfig;
use crate::error::Result;
use melodymap_client::{ClientConfig, MelodyMapClient};
use melodymap_core::{FileSessionStore, Playlists, RecentlyPlayed, Route, SessionStore, TimeRange};
use melodymap_views::{
    CallbackState, CallbackView, EntryView, FetchState, HistoryNavigator, HomeData, HomeView,
    Layout, LayoutAction, LayoutShell, Navigation, Navigator, RecommendationSelection,
    RecommendationsData, RecommendationsView, RouteGuard, ViewError,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Upper bound on pages rendered for one command.
const MAX_NAVIGATION_HOPS: usize = 4;

/// A page to mount, with its initial parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// Entry page, optionally activating sign-in right away
    Entry { sign_in: bool },
    /// Callback page for an incoming redirect
    Callback { incoming: String },
    /// Home page with a time range
    Home { time_range: TimeRange },
    /// Recommendations page with both selectors
    Recommendations { selection: RecommendationSelection },
    /// Playlist listing, shown under the home route
    Playlists,
    /// Play history listing, shown under the home route
    RecentlyPlayed,
}

impl PageRequest {
    /// Request for a plain visit to `route`
    pub fn for_route(route: Route) -> Self {
        match route {
            Route::Entry => PageRequest::Entry { sign_in: false },
            Route::Callback => PageRequest::Callback {
                incoming: route.path().to_string(),
            },
            Route::Home => PageRequest::Home {
                time_range: TimeRange::default(),
            },
            Route::Recommendations => PageRequest::Recommendations {
                selection: RecommendationSelection::default(),
            },
        }
    }

    /// Route the page lives under
    pub fn route(&self) -> Route {
        match self {
            PageRequest::Entry { .. } => Route::Entry,
            PageRequest::Callback { .. } => Route::Callback,
            PageRequest::Home { .. } | PageRequest::Playlists | PageRequest::RecentlyPlayed => {
                Route::Home
            }
            PageRequest::Recommendations { .. } => Route::Recommendations,
        }
    }
}

/// Page content after mounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Entry {
        is_loading: bool,
        login_url: String,
    },
    Callback {
        state: CallbackState,
    },
    Home {
        time_range: TimeRange,
        state: FetchState<HomeData>,
    },
    Recommendations {
        selection: RecommendationSelection,
        state: FetchState<RecommendationsData>,
    },
    Playlists {
        state: FetchState<Playlists>,
    },
    RecentlyPlayed {
        state: FetchState<RecentlyPlayed>,
    },
    /// The route guard turned the visitor away; nothing is shown
    Guarded,
}

/// One rendered page inside the layout shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub layout: Layout,
    pub page: Page,
}

/// Everything one command showed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visit {
    /// Pages in the order they were shown
    pub screens: Vec<Screen>,
    /// External URL the last page redirected to
    pub redirect: Option<String>,
}

impl Visit {
    /// The page the visit ended on
    pub fn last_screen(&self) -> Option<&Screen> {
        self.screens.last()
    }
}

pub struct Dashboard {
    session: Arc<dyn SessionStore>,
    client: Arc<MelodyMapClient>,
    navigator: Arc<HistoryNavigator>,
    shell: LayoutShell,
}

impl Dashboard {
    /// Build the host from configuration, with the session kept on disk.
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let session = Arc::new(FileSessionStore::new(&config.session.path));
        Self::with_session(config.client_config(), session)
    }

    /// Build the host around an existing session store.
    pub fn with_session(
        client_config: ClientConfig,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self> {
        let client = Arc::new(MelodyMapClient::new(client_config, Arc::clone(&session))?);
        let navigator = Arc::new(HistoryNavigator::new());
        let shell = LayoutShell::new(
            Arc::clone(&session),
            Arc::clone(&navigator) as Arc<dyn Navigator>,
            client.login_url(),
        );

        Ok(Self {
            session,
            client,
            navigator,
            shell,
        })
    }

    /// The backend client
    pub fn client(&self) -> &MelodyMapClient {
        &self.client
    }

    fn navigator(&self) -> Arc<dyn Navigator> {
        Arc::clone(&self.navigator) as Arc<dyn Navigator>
    }

    /// Mount `request` and follow whatever navigation it triggers.
    pub async fn open(&self, request: PageRequest) -> Result<Visit> {
        self.drive(Some(request)).await
    }

    /// Run a layout action, then follow the resulting navigation.
    pub async fn activate(&self, action: LayoutAction) -> Result<Visit> {
        self.shell.activate(action).await?;
        self.drive(None).await
    }

    /// Layout of the entry route for the session as stored now.
    pub async fn status(&self) -> Result<Layout> {
        Ok(self.shell.layout(Route::Entry).await?)
    }

    async fn drive(&self, first: Option<PageRequest>) -> Result<Visit> {
        let mut visit = Visit::default();
        let mut next = first;

        loop {
            if next.is_none() {
                next = self.take_navigation(&mut visit);
            }
            let Some(request) = next.take() else {
                break;
            };

            if visit.screens.len() == MAX_NAVIGATION_HOPS {
                warn!(route = %request.route(), "Navigation limit reached, stopping");
                break;
            }

            let screen = self.render(request).await?;
            visit.screens.push(screen);
        }

        if let Some(url) = &visit.redirect {
            info!(url = %url, "Leaving the dashboard");
        }
        Ok(visit)
    }

    /// Latest internal navigation, unless an external redirect was asked for.
    fn take_navigation(&self, visit: &mut Visit) -> Option<PageRequest> {
        let mut next = None;
        for navigation in self.navigator.drain() {
            match navigation {
                Navigation::Internal(route) => next = Some(PageRequest::for_route(route)),
                Navigation::External(url) => {
                    visit.redirect = Some(url);
                    return None;
                }
            }
        }
        next
    }

    async fn render(&self, request: PageRequest) -> Result<Screen> {
        let route = request.route();
        debug!(route = %route, "Mounting page");

        let page = match request {
            PageRequest::Entry { sign_in } => self.entry(sign_in),
            PageRequest::Callback { incoming } => self.callback(&incoming).await,
            guarded => self.guarded(route, guarded).await?,
        };

        let layout = self.shell.layout(route).await?;
        Ok(Screen { layout, page })
    }

    fn entry(&self, sign_in: bool) -> Page {
        let mut view = EntryView::new(self.navigator(), self.client.login_url());
        if sign_in {
            view.sign_in();
        }
        Page::Entry {
            is_loading: view.is_loading(),
            login_url: view.login_url().to_string(),
        }
    }

    async fn callback(&self, incoming: &str) -> Page {
        let mut view =
            CallbackView::new(Arc::clone(&self.session), self.navigator());
        if let Err(e) = view.handle(incoming).await {
            warn!(error = %e, "Sign-in callback failed");
        }
        Page::Callback {
            state: view.state(),
        }
    }

    async fn guarded(&self, route: Route, request: PageRequest) -> Result<Page> {
        let mut guard =
            RouteGuard::new(Arc::clone(&self.session), self.navigator());
        guard.on_route_change(route).await?;

        let page = match guard.reveal(request) {
            Some(PageRequest::Home { time_range }) => {
                let view = HomeView::new(Arc::clone(&self.client));
                view.set_time_range(time_range).await;
                view.mount().await;
                let state = view.state().await;
                view.unmount();
                Page::Home { time_range, state }
            }
            Some(PageRequest::Recommendations { selection }) => {
                let view = RecommendationsView::new(Arc::clone(&self.client));
                view.set_time_range(selection.time_range).await;
                view.set_limit(selection.limit).await;
                view.mount().await;
                let state = view.state().await;
                view.unmount();
                Page::Recommendations { selection, state }
            }
            Some(PageRequest::Playlists) => Page::Playlists {
                state: settled(self.client.playlists().await),
            },
            Some(PageRequest::RecentlyPlayed) => Page::RecentlyPlayed {
                state: settled(self.client.recently_played().await),
            },
            Some(PageRequest::Entry { .. } | PageRequest::Callback { .. }) | None => {
                Page::Guarded
            }
        };

        Ok(page)
    }
}

fn settled<T>(outcome: melodymap_client::Result<T>) -> FetchState<T> {
    let mut state = FetchState::default();
    state.settle(outcome.map_err(ViewError::from));
    state
}
