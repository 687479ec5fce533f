//! Authenticated fetch behavior against a mock backend.
//!
//! These tests pin down the refresh-and-retry contract: which requests go
//! out, how many, with which token, and what ends up in the session store.

use melodymap_client::{ClientConfig, ClientError, FetchRequest, MelodyMapClient};
use melodymap_core::{MemorySessionStore, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client_with(server: &MockServer, store: Arc<MemorySessionStore>) -> MelodyMapClient {
    MelodyMapClient::new(ClientConfig::new(server.uri()), store).unwrap()
}

async fn requests_to(server: &MockServer, route: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == route)
        .collect()
}

fn profile_json() -> serde_json::Value {
    serde_json::json!({ "display_name": "Ada", "images": [] })
}

// =============================================================================
// Missing Session
// =============================================================================

mod missing_session {
    use super::*;

    #[tokio::test]
    async fn test_no_token_fails_without_network_call() {
        let mock_server = MockServer::start().await;
        let store = Arc::new(MemorySessionStore::new());
        let client = client_with(&mock_server, store);

        let request = FetchRequest::get(format!("{}/spotify/me", mock_server.uri()));
        let result = client.fetch().send(&request).await;

        assert!(matches!(result, Err(ClientError::Unauthenticated)));
        let received = mock_server.received_requests().await.unwrap();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_typed_call_without_token_is_unauthenticated() {
        let mock_server = MockServer::start().await;
        let client = client_with(&mock_server, Arc::new(MemorySessionStore::new()));

        match client.profile().await {
            Err(ClientError::Unauthenticated) => {}
            other => panic!("Expected Unauthenticated, got {:?}", other.map(|_| ())),
        }
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }
}

// =============================================================================
// Happy Path
// =============================================================================

mod passthrough {
    use super::*;

    #[tokio::test]
    async fn test_attaches_bearer_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/me"))
            .and(header("authorization", "Bearer abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemorySessionStore::with_token("abc123"));
        let client = client_with(&mock_server, store);

        let profile = client.profile().await.unwrap();
        assert_eq!(profile.display_name, "Ada");
    }

    #[tokio::test]
    async fn test_non_401_errors_returned_unmodified() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/me"))
            .respond_with(ResponseTemplate::new(503).set_body_string("backend down"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemorySessionStore::with_token("abc123"));
        let client = client_with(&mock_server, store);

        let request = FetchRequest::get(format!("{}/spotify/me", mock_server.uri()));
        let response = client.fetch().send(&request).await.unwrap();

        assert_eq!(response.status().as_u16(), 503);
        assert_eq!(response.text().await.unwrap(), "backend down");
        assert!(requests_to(&mock_server, "/auth/refresh").await.is_empty());
    }
}

// =============================================================================
// Refresh And Retry
// =============================================================================

mod refresh {
    use super::*;

    async fn mount_expired_then_valid(mock_server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/spotify/me"))
            .and(header("authorization", "Bearer old"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/spotify/me"))
            .and(header("authorization", "Bearer new"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
            .expect(1)
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn test_401_then_successful_refresh_retries_once() {
        let mock_server = MockServer::start().await;
        mount_expired_then_valid(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .and(header("authorization", "Bearer old"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access_token": "new" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemorySessionStore::with_token("old"));
        let client = client_with(&mock_server, Arc::clone(&store));

        let request = FetchRequest::get(format!("{}/spotify/me", mock_server.uri()));
        let response = client.fetch().send(&request).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);

        assert_eq!(requests_to(&mock_server, "/spotify/me").await.len(), 2);
        assert_eq!(requests_to(&mock_server, "/auth/refresh").await.len(), 1);
        assert_eq!(store.get().await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_failed_refresh_is_session_expired_and_keeps_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/me"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "access_token": "should-not-be-applied"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemorySessionStore::with_token("old"));
        let client = client_with(&mock_server, Arc::clone(&store));

        let request = FetchRequest::get(format!("{}/spotify/me", mock_server.uri()));
        let result = client.fetch().send(&request).await;

        assert!(matches!(result, Err(ClientError::SessionExpired)));
        assert_eq!(store.get().await.unwrap().as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn test_malformed_refresh_body_is_session_expired() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "message": "Token refreshed successfully" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemorySessionStore::with_token("old"));
        let client = client_with(&mock_server, Arc::clone(&store));

        let result = client.profile().await;
        assert!(matches!(result, Err(ClientError::SessionExpired)));
        assert_eq!(store.get().await.unwrap().as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn test_second_401_returned_unmodified() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/me"))
            .respond_with(ResponseTemplate::new(401).set_body_string("still no"))
            .expect(2)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access_token": "new" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemorySessionStore::with_token("old"));
        let client = client_with(&mock_server, Arc::clone(&store));

        let request = FetchRequest::get(format!("{}/spotify/me", mock_server.uri()));
        let response = client.fetch().send(&request).await.unwrap();
        assert_eq!(response.status().as_u16(), 401);
        assert_eq!(response.text().await.unwrap(), "still no");
        assert_eq!(store.get().await.unwrap().as_deref(), Some("new"));
        assert_eq!(requests_to(&mock_server, "/spotify/me").await.len(), 2);
    }

    #[tokio::test]
    async fn test_second_401_surfaces_as_failed_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/me"))
            .respond_with(ResponseTemplate::new(401).set_body_string("still no"))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access_token": "new" })),
            )
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemorySessionStore::with_token("old"));
        let client = client_with(&mock_server, store);

        match client.profile().await.unwrap_err() {
            ClientError::RequestFailed { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "still no");
            }
            other => panic!("Expected RequestFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_retry_replays_query_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/spotify/echo"))
            .and(header("authorization", "Bearer old"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/spotify/echo"))
            .and(header("authorization", "Bearer new"))
            .and(query_param("time_range", "short_term"))
            .and(body_json(serde_json::json!({ "seed": 5 })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access_token": "new" })),
            )
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemorySessionStore::with_token("old"));
        let client = client_with(&mock_server, store);

        let request = FetchRequest::post(format!("{}/spotify/echo", mock_server.uri()))
            .query("time_range", "short_term")
            .json(&serde_json::json!({ "seed": 5 }))
            .unwrap();
        let response = client.fetch().send(&request).await.unwrap();

        assert_eq!(response.status().as_u16(), 204);
    }
}

// =============================================================================
// Concurrent Refresh
// =============================================================================

mod concurrency {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_401s_share_one_refresh() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spotify/me"))
            .and(header("authorization", "Bearer old"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/spotify/me"))
            .and(header("authorization", "Bearer new"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
            .expect(2)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access_token": "new" }))
                    .set_delay(Duration::from_millis(200)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemorySessionStore::with_token("old"));
        let client = client_with(&mock_server, Arc::clone(&store));

        let (first, second) = tokio::join!(client.profile(), client.profile());

        assert_eq!(first.unwrap().display_name, "Ada");
        assert_eq!(second.unwrap().display_name, "Ada");
        assert_eq!(requests_to(&mock_server, "/auth/refresh").await.len(), 1);
        assert_eq!(store.get().await.unwrap().as_deref(), Some("new"));
    }
}
