//! Domain types shared by the client, the views, and the terminal host.

mod library;
mod listening;
mod route;
mod selection;

pub use library::{PlayHistory, Playlist, PlaylistTracks, Playlists, RecentlyPlayed};
pub use listening::{
    Album, Artist, ArtistRef, Image, Recommendation, Recommendations, RefreshResponse, TopItems,
    Track, UserProfile,
};
pub use route::Route;
pub use selection::{RecommendationLimit, TimeRange, HOME_TOP_ITEMS_LIMIT};
