/// Listening statistics as served by the MelodyMap backend
use serde::{Deserialize, Deserializer, Serialize};

/// Artwork reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL
    pub url: String,
    /// Height in pixels, when reported
    #[serde(default)]
    pub height: Option<u32>,
    /// Width in pixels, when reported
    #[serde(default)]
    pub width: Option<u32>,
}

/// The signed-in user's streaming profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Name shown in the welcome banner; empty when the account has none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub display_name: String,
    /// Profile pictures, largest first
    #[serde(default)]
    pub images: Option<Vec<Image>>,
}

impl UserProfile {
    /// URL of the first profile image, used as the avatar
    pub fn avatar_url(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|images| images.first())
            .map(|image| image.url.as_str())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A ranked artist from the user's top items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Streaming-service identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Artist name
    pub name: String,
    /// Artist pictures
    #[serde(default)]
    pub images: Vec<Image>,
}

impl Artist {
    /// URL of the first artist image
    pub fn image_url(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }
}

/// Artist reference nested in a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    /// Streaming-service identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Artist name
    pub name: String,
}

/// Album reference nested in a track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Streaming-service identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Album title
    #[serde(default)]
    pub name: Option<String>,
    /// Cover art
    #[serde(default)]
    pub images: Vec<Image>,
}

/// A track from the user's top items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Streaming-service identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Track title
    pub name: String,
    /// Credited artists, primary first
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    /// Album the track belongs to
    #[serde(default)]
    pub album: Album,
}

impl Track {
    /// Name of the first credited artist
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|artist| artist.name.as_str())
    }

    /// URL of the first album cover
    pub fn album_art_url(&self) -> Option<&str> {
        self.album.images.first().map(|image| image.url.as_str())
    }
}

/// A recommended track. Unlike top tracks, the id is mandatory because
/// recommendation lists are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Streaming-service identifier
    pub id: String,
    /// Track title
    pub name: String,
    /// Credited artists, primary first
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    /// Album the track belongs to
    #[serde(default)]
    pub album: Album,
}

impl Recommendation {
    /// Name of the first credited artist
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|artist| artist.name.as_str())
    }

    /// URL of the first album cover
    pub fn album_art_url(&self) -> Option<&str> {
        self.album.images.first().map(|image| image.url.as_str())
    }
}

/// Response of the top-items endpoints, in backend rank order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopItems<T> {
    /// Ranked items; absent decodes as empty
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Human-readable description of the range the backend used
    #[serde(default)]
    pub time_range: Option<String>,
    /// Page size the backend applied
    #[serde(default)]
    pub limit: Option<u32>,
    /// Page offset the backend applied
    #[serde(default)]
    pub offset: Option<u32>,
    /// Total number of items available
    #[serde(default)]
    pub total: Option<u32>,
}

/// Response of the recommendations endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Recommended tracks, best first; absent decodes as empty
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// Response of the token refresh endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Replacement bearer token
    pub access_token: String,
}
