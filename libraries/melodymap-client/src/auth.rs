//! Authentication endpoints of the MelodyMap backend.

use crate::error::{ClientError, Result};
use melodymap_core::RefreshResponse;
use reqwest::Client;
use tracing::{debug, warn};

/// Authentication client for the MelodyMap backend.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// URL the browser is sent to in order to start the OAuth flow.
    ///
    /// The backend redirects to the identity provider and eventually back to
    /// the dashboard's callback route with `access_token` in the query.
    pub fn login_url(&self) -> String {
        format!("{}/auth/login", self.base_url)
    }

    /// Exchange the current bearer token for a fresh one.
    pub async fn refresh_token(&self, current_token: &str) -> Result<RefreshResponse> {
        let url = format!("{}/auth/refresh", self.base_url);
        debug!(url = %url, "Refreshing access token");

        let response = self
            .http
            .post(&url)
            .bearer_auth(current_token)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let refresh: RefreshResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse refresh response: {}", e))
            })?;

            if refresh.access_token.is_empty() {
                return Err(ClientError::ParseError(
                    "Refresh response carried an empty access token".to_string(),
                ));
            }

            debug!("Token refresh successful");
            Ok(refresh)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Token refresh rejected");
            Err(ClientError::RequestFailed {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}
