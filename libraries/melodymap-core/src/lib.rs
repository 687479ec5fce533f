//! MelodyMap Core
//!
//! Platform-agnostic types, the session store seam, and error handling for
//! the MelodyMap dashboard.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `UserProfile`, `Artist`, `Track`, `Recommendation`, etc.
//! - **Selections**: `TimeRange` and `RecommendationLimit`
//! - **Routes**: the dashboard's client-side routes
//! - **Session**: the `SessionStore` trait with memory and file backends
//! - **Error Handling**: `SessionError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use melodymap_core::{MemorySessionStore, SessionStore, TimeRange};
//!
//! # tokio_test_block(async {
//! let store = MemorySessionStore::new();
//! store.set("abc123").await.unwrap();
//! assert_eq!(store.get().await.unwrap().as_deref(), Some("abc123"));
//! assert_eq!(TimeRange::default().as_str(), "medium_term");
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod session;
pub mod types;

pub use error::{Result, SessionError};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore, SESSION_TOKEN_KEY};

pub use types::{
    // Listening data
    Album, Artist, ArtistRef, Image, PlayHistory, Playlist, PlaylistTracks, Playlists,
    RecentlyPlayed, Recommendation, Recommendations, RefreshResponse, TopItems, Track,
    UserProfile,
    // Selections
    RecommendationLimit, TimeRange, HOME_TOP_ITEMS_LIMIT,
    // Routes
    Route,
};
