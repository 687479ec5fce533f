//! MelodyMap Views
//!
//! Page controllers and navigation chrome for the MelodyMap dashboard,
//! independent of how pages are drawn.
//!
//! # Architecture
//!
//! - **Navigator**: the seam through which views request navigation
//! - **Route guard**: keeps protected pages behind a stored session token
//! - **Layout shell**: sign-in, sign-out and page links per route
//! - **Pages**: entry, callback, home and recommendations controllers
//!
//! Data pages run fetch cycles: all calls of a cycle go out together and
//! the page shows either every result or one failure message. Results that
//! land after the page was unmounted, or after a newer cycle started, are
//! dropped.

pub mod callback;
mod cycle;
pub mod entry;
pub mod error;
pub mod guard;
pub mod home;
pub mod layout;
pub mod navigator;
pub mod recommendations;

pub use callback::{extract_access_token, CallbackState, CallbackView, PROCESSING_MESSAGE};
pub use cycle::FetchState;
pub use entry::{EntryView, ENTRY_PROMPT, ENTRY_TITLE, SIGN_IN_LABEL};
pub use error::{Result, ViewError, AUTH_FAILED_MESSAGE, FETCH_FAILED_MESSAGE};
pub use guard::{GuardState, RouteGuard};
pub use home::{HomeData, HomeView};
pub use layout::{layout_for, Layout, LayoutAction, LayoutShell};
pub use navigator::{HistoryNavigator, Navigation, Navigator};
pub use recommendations::{RecommendationSelection, RecommendationsData, RecommendationsView};
