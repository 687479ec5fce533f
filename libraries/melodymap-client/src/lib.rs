//! MelodyMap Client
//!
//! HTTP client library for the MelodyMap backend API.
//!
//! # Features
//!
//! - **Authenticated fetch**: bearer token from an injected session store,
//!   one refresh-and-retry on 401, coalesced concurrent refreshes
//! - **Listening data**: profile, top artists, top tracks
//! - **Recommendations**: recommended tracks by time range and limit
//! - **Library**: playlists and recently played tracks
//!
//! # Example
//!
//! ```ignore
//! use melodymap_client::{ClientConfig, MelodyMapClient};
//! use melodymap_core::{FileSessionStore, RecommendationLimit, TimeRange};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Arc::new(FileSessionStore::new("./data/session.json"));
//!     let client = MelodyMapClient::new(ClientConfig::default(), session)?;
//!
//!     if !client.is_authenticated().await? {
//!         println!("Sign in at {}", client.login_url());
//!         return Ok(());
//!     }
//!
//!     let picks = client
//!         .recommendations(TimeRange::MediumTerm, RecommendationLimit::Ten)
//!         .await?;
//!     println!("Got {} recommendations", picks.recommendations.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod fetch;
mod types;

// Re-export main types
pub use client::MelodyMapClient;
pub use error::{ClientError, Result};
pub use fetch::{AuthFetch, RetryPolicy};
pub use types::{ClientConfig, FetchRequest, DEFAULT_BASE_URL};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
