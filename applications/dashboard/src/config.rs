/// Dashboard configuration
use crate::error::{DashboardError, Result};
use melodymap_client::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "melodymap.toml";

/// Prefix of environment overrides, e.g. `MELODYMAP_API__BASE_URL`.
pub const ENV_PREFIX: &str = "MELODYMAP";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    /// JSON file holding the session token
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl DashboardConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `config_file` must exist; otherwise `melodymap.toml` is
    /// read if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(config_file, ENV_PREFIX)
    }

    /// Same as [`load`](Self::load) with a custom environment prefix.
    pub fn load_with_prefix(config_file: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut settings = config::Config::builder();

        match config_file {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Nested keys use a double underscore: MELODYMAP_SESSION__PATH
        settings = settings.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| DashboardError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| DashboardError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(DashboardError::Config(
                "API base URL is required (set MELODYMAP_API__BASE_URL)".to_string(),
            ));
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(DashboardError::Config(format!(
                "API base URL must start with http:// or https://, got {:?}",
                base_url
            )));
        }

        if self.api.timeout_secs == 0 || self.api.connect_timeout_secs == 0 {
            return Err(DashboardError::Config(
                "Timeouts must be at least one second".to_string(),
            ));
        }

        Ok(())
    }

    /// HTTP client settings derived from the `api` section
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api.base_url.trim())
            .with_timeouts(self.api.timeout_secs, self.api.connect_timeout_secs)
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
        timeout_secs: default_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_session() -> SessionSettings {
    SessionSettings {
        path: default_session_path(),
    }
}

fn default_session_path() -> PathBuf {
    PathBuf::from("./data/session.json")
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            session: default_session(),
        }
    }
}
