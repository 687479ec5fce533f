//! Authenticated fetch with a single refresh-and-retry.

use crate::auth::AuthClient;
use crate::error::{ClientError, Result};
use crate::types::FetchRequest;
use melodymap_core::SessionStore;
use reqwest::{Client, Response, StatusCode};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Where a request stands in the refresh-and-retry sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// First attempt with the stored token
    Initial,
    /// The token was refreshed and the request replayed once
    RetriedAfterRefresh,
}

impl RetryPolicy {
    /// State to move to after a 401, or `None` when no attempt is left.
    pub fn on_unauthorized(self) -> Option<RetryPolicy> {
        match self {
            RetryPolicy::Initial => Some(RetryPolicy::RetriedAfterRefresh),
            RetryPolicy::RetriedAfterRefresh => None,
        }
    }
}

/// Sends requests with the stored bearer token.
///
/// A 401 triggers one refresh through `POST /auth/refresh` followed by one
/// replay of the original request. Every other status, including a second
/// 401, is handed back untouched; interpreting it is the caller's job.
///
/// Refreshes are serialized. A request that saw a 401 for a token that has
/// since been replaced by another request's refresh skips its own refresh
/// and replays with the new token.
pub struct AuthFetch {
    http: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
    refresh_gate: Mutex<()>,
}

impl AuthFetch {
    pub(crate) fn new(http: Client, base_url: String, session: Arc<dyn SessionStore>) -> Self {
        Self {
            http,
            base_url,
            session,
            refresh_gate: Mutex::new(()),
        }
    }

    /// The session store this fetcher reads and updates.
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Send `request` with the stored token.
    ///
    /// Fails with [`ClientError::Unauthenticated`] before touching the
    /// network when no token is stored, and with
    /// [`ClientError::SessionExpired`] when a refresh was needed but failed.
    pub async fn send(&self, request: &FetchRequest) -> Result<Response> {
        let mut policy = RetryPolicy::Initial;

        loop {
            let token = self
                .session
                .get()
                .await?
                .ok_or(ClientError::Unauthenticated)?;

            let response = self.dispatch(request, &token).await?;
            if response.status() != StatusCode::UNAUTHORIZED {
                return Ok(response);
            }

            match policy.on_unauthorized() {
                Some(next) => {
                    debug!(url = %request.url, "Unauthorized, refreshing session");
                    self.refresh(&token).await?;
                    policy = next;
                }
                None => {
                    warn!(url = %request.url, "Still unauthorized after refresh");
                    return Ok(response);
                }
            }
        }
    }

    async fn dispatch(&self, request: &FetchRequest, token: &str) -> Result<Response> {
        debug!(method = %request.method, url = %request.url, "Sending authenticated request");

        let mut builder = self
            .http
            .request(request.method.clone(), &request.url)
            .bearer_auth(token);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        Ok(builder.send().await?)
    }

    /// Replace `stale` with a refreshed token unless someone already did.
    async fn refresh(&self, stale: &str) -> Result<()> {
        let _gate = self.refresh_gate.lock().await;

        let current = self
            .session
            .get()
            .await?
            .ok_or(ClientError::Unauthenticated)?;
        if current != stale {
            debug!("Session already refreshed by a concurrent request");
            return Ok(());
        }

        let auth_client = AuthClient::new(&self.http, &self.base_url);
        match auth_client.refresh_token(&current).await {
            Ok(refreshed) => {
                self.session.set(&refreshed.access_token).await?;
                info!("Session token refreshed");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                Err(ClientError::SessionExpired)
            }
        }
    }
}
