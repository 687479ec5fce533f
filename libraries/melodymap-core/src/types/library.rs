/// Playlist and play-history listings
use super::listening::Track;
use serde::{Deserialize, Serialize};

/// Track count summary attached to a playlist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistTracks {
    /// Number of tracks in the playlist
    #[serde(default)]
    pub total: u32,
}

/// A playlist owned by or shared with the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Streaming-service identifier
    pub id: String,
    /// Playlist name
    pub name: String,
    /// Whether the playlist is public
    #[serde(default)]
    pub public: Option<bool>,
    /// Track count summary
    #[serde(default)]
    pub tracks: PlaylistTracks,
}

/// Response of the playlists endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlists {
    /// Playlists in backend order
    #[serde(default)]
    pub items: Vec<Playlist>,
}

/// One entry in the user's play history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayHistory {
    /// Track that was played
    pub track: Track,
    /// ISO-8601 timestamp of the play
    pub played_at: String,
}

/// Response of the recently-played endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentlyPlayed {
    /// Plays, most recent first
    #[serde(default)]
    pub items: Vec<PlayHistory>,
}
