//! MelodyMap Dashboard Library
//!
//! Terminal host for the MelodyMap listening dashboard: configuration, the
//! page host that stands in for a browser, and plain-text rendering.
//!
//! This library exposes the host for testing purposes.

pub mod app;
pub mod config;
pub mod error;
pub mod render;

// Re-export commonly used types for convenience
pub use app::{Dashboard, Page, PageRequest, Screen, Visit};
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
