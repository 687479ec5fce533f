/// Client-side routes of the dashboard
use std::fmt;

/// A page of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page with the sign-in action
    Entry,
    /// Target of the OAuth redirect
    Callback,
    /// Top artists and tracks
    Home,
    /// Recommended tracks
    Recommendations,
}

impl Route {
    /// Path of the route
    pub fn path(&self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::Callback => "/callback",
            Route::Home => "/home",
            Route::Recommendations => "/recommendations",
        }
    }

    /// Resolve a path (query string and trailing slash ignored)
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Entry),
            "/callback" => Some(Route::Callback),
            "/home" => Some(Route::Home),
            "/recommendations" => Some(Route::Recommendations),
            _ => None,
        }
    }

    /// Whether the route sits behind the route guard
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Home | Route::Recommendations)
    }

    /// Routes reachable from the navigation links
    pub fn protected_routes() -> [Route; 2] {
        [Route::Home, Route::Recommendations]
    }

    /// Link label
    pub fn title(&self) -> &'static str {
        match self {
            Route::Entry => "Welcome",
            Route::Callback => "Signing In",
            Route::Home => "Home",
            Route::Recommendations => "Recommendations",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
