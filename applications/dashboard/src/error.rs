/// Dashboard error types
use melodymap_client::ClientError;
use melodymap_core::SessionError;
use melodymap_views::ViewError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("View error: {0}")]
    View(#[from] ViewError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}
