//! Main MelodyMap backend client.

use crate::auth::AuthClient;
use crate::error::{ClientError, Result};
use crate::fetch::AuthFetch;
use crate::types::{ClientConfig, FetchRequest};
use melodymap_core::{
    Artist, Playlists, RecentlyPlayed, RecommendationLimit, Recommendations, SessionStore,
    TimeRange, TopItems, Track, UserProfile,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Client for the MelodyMap backend.
///
/// Every data call goes through [`AuthFetch`], so it carries the stored
/// bearer token and gets one refresh-and-retry on 401. Non-success statuses
/// surface as [`ClientError::RequestFailed`].
///
/// # Example
///
/// ```ignore
/// use melodymap_client::{ClientConfig, MelodyMapClient};
/// use melodymap_core::{MemorySessionStore, TimeRange};
/// use std::sync::Arc;
///
/// let session = Arc::new(MemorySessionStore::with_token("abc123"));
/// let client = MelodyMapClient::new(ClientConfig::new("http://127.0.0.1:8000"), session)?;
///
/// let profile = client.profile().await?;
/// let artists = client.top_artists(TimeRange::ShortTerm, 15).await?;
/// println!("{} has {} top artists", profile.display_name, artists.items.len());
/// ```
pub struct MelodyMapClient {
    http: Client,
    url: String,
    fetch: AuthFetch,
}

impl MelodyMapClient {
    /// Create a new client for the configured backend.
    pub fn new(config: ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self> {
        let url = normalize_url(&config.url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(format!("MelodyMap/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        let fetch = AuthFetch::new(http.clone(), url.clone(), session);

        Ok(Self { http, url, fetch })
    }

    /// The normalized backend URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The session store backing this client.
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        self.fetch.session()
    }

    /// Authenticated fetch for requests not covered by the typed methods.
    pub fn fetch(&self) -> &AuthFetch {
        &self.fetch
    }

    /// Authentication endpoints.
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.url)
    }

    /// URL that starts the OAuth sign-in flow.
    pub fn login_url(&self) -> String {
        self.auth().login_url()
    }

    /// Whether a session token is stored. The backend is not consulted.
    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.session().is_authenticated().await?)
    }

    /// Forget the session token. Purely local; the backend is not told.
    pub async fn logout(&self) -> Result<()> {
        self.session().clear().await?;
        info!("Signed out");
        Ok(())
    }

    /// The signed-in user's profile.
    pub async fn profile(&self) -> Result<UserProfile> {
        let request = FetchRequest::get(format!("{}/spotify/me", self.url));
        self.get_json(&request, "profile").await
    }

    /// Top artists over `time_range`, in rank order.
    pub async fn top_artists(&self, time_range: TimeRange, limit: u32) -> Result<TopItems<Artist>> {
        let request = FetchRequest::get(format!("{}/spotify/top/artists", self.url))
            .query("time_range", time_range)
            .query("limit", limit);
        let top: TopItems<Artist> = self.get_json(&request, "top artists").await?;
        debug!(time_range = %time_range, count = top.items.len(), "Fetched top artists");
        Ok(top)
    }

    /// Top tracks over `time_range`, in rank order.
    pub async fn top_tracks(&self, time_range: TimeRange, limit: u32) -> Result<TopItems<Track>> {
        let request = FetchRequest::get(format!("{}/spotify/top/tracks", self.url))
            .query("time_range", time_range)
            .query("limit", limit);
        let top: TopItems<Track> = self.get_json(&request, "top tracks").await?;
        debug!(time_range = %time_range, count = top.items.len(), "Fetched top tracks");
        Ok(top)
    }

    /// Recommended tracks seeded from the user's top tracks over `time_range`.
    pub async fn recommendations(
        &self,
        time_range: TimeRange,
        limit: RecommendationLimit,
    ) -> Result<Recommendations> {
        let request = FetchRequest::get(format!("{}/spotify/recommendations", self.url))
            .query("time_range", time_range)
            .query("limit", limit.value());
        let recommendations: Recommendations =
            self.get_json(&request, "recommendations").await?;
        debug!(
            time_range = %time_range,
            count = recommendations.recommendations.len(),
            "Fetched recommendations"
        );
        Ok(recommendations)
    }

    /// The user's playlists.
    pub async fn playlists(&self) -> Result<Playlists> {
        let request = FetchRequest::get(format!("{}/spotify/playlists", self.url));
        self.get_json(&request, "playlists").await
    }

    /// The user's recently played tracks.
    pub async fn recently_played(&self) -> Result<RecentlyPlayed> {
        let request = FetchRequest::get(format!("{}/spotify/recently-played", self.url));
        self.get_json(&request, "recently played").await
    }

    async fn get_json<T: DeserializeOwned>(&self, request: &FetchRequest, what: &str) -> Result<T> {
        let response = self.fetch.send(request).await?;
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
            })
        } else {
            let error_text = response.text().await.unwrap_or_default();
            debug!(status = %status, what = what, "Request failed");
            Err(ClientError::RequestFailed {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

fn normalize_url(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = raw.trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use melodymap_core::MemorySessionStore;

    fn client(url: &str) -> Result<MelodyMapClient> {
        MelodyMapClient::new(ClientConfig::new(url), Arc::new(MemorySessionStore::new()))
    }

    #[test]
    fn test_url_validation() {
        assert!(client("https://example.com").is_ok());
        assert!(client("http://127.0.0.1:8000").is_ok());

        assert!(client("").is_err());
        assert!(client("not-a-url").is_err());
        assert!(client("ftp://example.com").is_err());
        assert!(client("http://").is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client = client("http://127.0.0.1:8000//").expect("valid url");
        assert_eq!(client.url(), "http://127.0.0.1:8000");
        assert_eq!(client.login_url(), "http://127.0.0.1:8000/auth/login");
    }
}
