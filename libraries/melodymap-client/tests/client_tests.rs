//! Tests for the typed MelodyMap backend calls.
//!
//! These tests use mock servers to verify request shapes and response
//! handling without a running backend.

use melodymap_client::{ClientConfig, ClientError, MelodyMapClient, DEFAULT_BASE_URL};
use melodymap_core::{MemorySessionStore, RecommendationLimit, SessionStore, TimeRange};
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn signed_in_client(server: &MockServer) -> MelodyMapClient {
    let store = Arc::new(MemorySessionStore::with_token("test_token"));
    MelodyMapClient::new(ClientConfig::new(server.uri()), store).unwrap()
}

// =============================================================================
// Client Config Tests
// =============================================================================

mod client_config {
    use super::*;

    #[test]
    fn test_default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn test_with_timeouts() {
        let config = ClientConfig::new("https://example.com").with_timeouts(5, 2);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.connect_timeout_secs, 2);
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = MelodyMapClient::new(
            ClientConfig::new(""),
            Arc::new(MemorySessionStore::new()),
        );

        match result {
            Err(ClientError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected InvalidUrl error"),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

mod session_helpers {
    use super::*;

    #[tokio::test]
    async fn test_is_authenticated_reflects_store() {
        let mock_server = MockServer::start().await;
        let store = Arc::new(MemorySessionStore::new());
        let client =
            MelodyMapClient::new(ClientConfig::new(mock_server.uri()), Arc::<MemorySessionStore>::clone(&store)).unwrap();

        assert!(!client.is_authenticated().await.unwrap());
        store.set("abc").await.unwrap();
        assert!(client.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_clears_token_locally() {
        let mock_server = MockServer::start().await;
        let client = signed_in_client(&mock_server);

        client.logout().await.unwrap();

        assert!(client.session().get().await.unwrap().is_none());
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_url() {
        let mock_server = MockServer::start().await;
        let client = signed_in_client(&mock_server);

        assert_eq!(
            client.login_url(),
            format!("{}/auth/login", mock_server.uri())
        );
    }
}

// =============================================================================
// Listening Data
// =============================================================================

mod listening {
    use super::*;

    #[tokio::test]
    async fn test_profile() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/me"))
            .and(header("authorization", "Bearer test_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "display_name": "Ada Lovelace",
                "images": [{ "url": "https://img.example/ada.jpg", "height": 300, "width": 300 }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let profile = signed_in_client(&mock_server).profile().await.unwrap();

        assert_eq!(profile.display_name, "Ada Lovelace");
        assert_eq!(profile.avatar_url(), Some("https://img.example/ada.jpg"));
    }

    #[tokio::test]
    async fn test_profile_with_null_display_name() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "display_name": null,
                "images": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let profile = signed_in_client(&mock_server).profile().await.unwrap();

        assert_eq!(profile.display_name, "");
        assert!(profile.avatar_url().is_none());
    }

    #[tokio::test]
    async fn test_top_artists_sends_range_and_limit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/top/artists"))
            .and(query_param("time_range", "short_term"))
            .and(query_param("limit", "15"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    { "id": "a1", "name": "First", "images": [] },
                    { "id": "a2", "name": "Second", "images": [{ "url": "https://img.example/2.jpg" }] }
                ],
                "time_range": "Last 4 weeks",
                "limit": 15,
                "offset": 0,
                "total": 2
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let top = signed_in_client(&mock_server)
            .top_artists(TimeRange::ShortTerm, 15)
            .await
            .unwrap();

        let names: Vec<_> = top.items.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(top.items[1].image_url(), Some("https://img.example/2.jpg"));
        assert_eq!(top.total, Some(2));
    }

    #[tokio::test]
    async fn test_top_tracks_missing_items_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/top/tracks"))
            .and(query_param("time_range", "long_term"))
            .and(query_param("limit", "15"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let top = signed_in_client(&mock_server)
            .top_tracks(TimeRange::LongTerm, 15)
            .await
            .unwrap();

        assert!(top.items.is_empty());
    }

    #[tokio::test]
    async fn test_top_tracks_nested_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/top/tracks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "id": "t1",
                    "name": "Song",
                    "artists": [{ "name": "Lead" }, { "name": "Feature" }],
                    "album": { "name": "Record", "images": [{ "url": "https://img.example/cover.jpg" }] }
                }]
            })))
            .mount(&mock_server)
            .await;

        let top = signed_in_client(&mock_server)
            .top_tracks(TimeRange::MediumTerm, 15)
            .await
            .unwrap();

        let track = &top.items[0];
        assert_eq!(track.primary_artist(), Some("Lead"));
        assert_eq!(track.album_art_url(), Some("https://img.example/cover.jpg"));
    }
}

// =============================================================================
// Recommendations
// =============================================================================

mod recommendations {
    use super::*;

    #[tokio::test]
    async fn test_sends_range_and_limit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/recommendations"))
            .and(query_param("time_range", "medium_term"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "recommendations": [
                    { "id": "r1", "name": "One", "artists": [{ "name": "A" }], "album": { "images": [] } },
                    { "id": "r2", "name": "Two", "artists": [], "album": { "images": [] } }
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let picks = signed_in_client(&mock_server)
            .recommendations(TimeRange::MediumTerm, RecommendationLimit::Twenty)
            .await
            .unwrap();

        assert_eq!(picks.recommendations.len(), 2);
        assert_eq!(picks.recommendations[0].id, "r1");
        assert_eq!(picks.recommendations[1].primary_artist(), None);
    }

    #[tokio::test]
    async fn test_server_error_is_request_failed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/recommendations"))
            .respond_with(ResponseTemplate::new(500).set_body_string("No top tracks found"))
            .mount(&mock_server)
            .await;

        let result = signed_in_client(&mock_server)
            .recommendations(TimeRange::ShortTerm, RecommendationLimit::Five)
            .await;

        match result.unwrap_err() {
            ClientError::RequestFailed { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("No top tracks"));
            }
            _ => panic!("Expected RequestFailed error"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/recommendations"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let result = signed_in_client(&mock_server)
            .recommendations(TimeRange::ShortTerm, RecommendationLimit::Ten)
            .await;

        match result.unwrap_err() {
            ClientError::ParseError(msg) => assert!(msg.contains("recommendations")),
            _ => panic!("Expected ParseError"),
        }
    }
}

// =============================================================================
// Library
// =============================================================================

mod library {
    use super::*;

    #[tokio::test]
    async fn test_playlists() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    { "id": "p1", "name": "Morning", "public": true, "tracks": { "total": 12 } },
                    { "id": "p2", "name": "Late", "tracks": { "total": 3 } }
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let playlists = signed_in_client(&mock_server).playlists().await.unwrap();

        assert_eq!(playlists.items.len(), 2);
        assert_eq!(playlists.items[0].tracks.total, 12);
        assert_eq!(playlists.items[1].public, None);
    }

    #[tokio::test]
    async fn test_recently_played() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/recently-played"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "track": { "name": "Replay", "artists": [{ "name": "Loop" }] },
                    "played_at": "2024-03-01T10:00:00Z"
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let recent = signed_in_client(&mock_server).recently_played().await.unwrap();

        assert_eq!(recent.items[0].track.name, "Replay");
        assert_eq!(recent.items[0].played_at, "2024-03-01T10:00:00Z");
    }
}
