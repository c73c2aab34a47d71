//! Layered configuration.
//!
//! Sources, later ones win:
//! 1. Built-in defaults
//! 2. A TOML file: an explicit path, or `courier/config.toml` under the
//!    platform config directory (optional)
//! 3. Environment variables prefixed `COURIER_`, nested with `__`
//!
//! ```toml
//! api_base_url = "http://localhost:5000/api"
//! request_timeout_secs = 30
//! active_environment = "local"
//!
//! [environments.local]
//! name = "Local"
//! variables = { host = "http://localhost:8080", token = "" }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment as EnvSource, File, FileFormat, Map};
use courier_domain::{DomainError, Environment, EnvironmentRegistry, UserId};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Default address of the proxy and persistence service.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Default transport timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_PREFIX: &str = "COURIER";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or parsed.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// `api_base_url` is not an absolute http(s) URL.
    #[error("invalid api_base_url {url:?}: {message}")]
    InvalidBaseUrl {
        /// The configured value.
        url: String,
        /// Why it was rejected.
        message: String,
    },

    /// The environment table is empty or names an unknown active entry.
    #[error("invalid environments: {0}")]
    Environments(#[from] DomainError),
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Base URL of the backend API.
    pub api_base_url: String,
    /// Fixed user id; anonymous when unset.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Transport timeout in seconds.
    pub request_timeout_secs: u64,
    /// Environment to activate at startup.
    #[serde(default)]
    pub active_environment: Option<String>,
    /// Replaces the built-in environments when present.
    #[serde(default)]
    pub environments: Option<IndexMap<String, Environment>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_id: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            active_environment: None,
            environments: None,
        }
    }
}

impl Settings {
    /// Loads settings from defaults, the config file and the process
    /// environment.
    ///
    /// An explicit `path` must exist; the default location is optional.
    ///
    /// # Errors
    /// Returns a `ConfigError` if a source is malformed or a value is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`Self::load`], but reads `COURIER_*` variables from `env`
    /// instead of the process environment when given.
    ///
    /// # Errors
    /// Returns a `ConfigError` if a source is malformed or a value is invalid.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS)?;

        match path {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                builder = builder.add_source(File::from(path).format(FileFormat::Toml));
            }
            None => {
                if let Some(path) = default_config_path() {
                    debug!(path = %path.display(), "looking for config file");
                    builder = builder.add_source(
                        File::from(path).format(FileFormat::Toml).required(false),
                    );
                }
            }
        }

        let settings: Self = builder
            .add_source(
                EnvSource::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        settings.base_url()?;
        settings.registry()?;
        Ok(settings)
    }

    /// The backend base URL, validated.
    ///
    /// # Errors
    /// Returns `InvalidBaseUrl` unless the value is an absolute http(s) URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidBaseUrl {
            url: self.api_base_url.clone(),
            message,
        };
        let url = Url::parse(&self.api_base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }
        Ok(url)
    }

    /// Transport timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The configured user, or anonymous.
    #[must_use]
    pub fn user(&self) -> UserId {
        self.user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(UserId::new)
            .unwrap_or_default()
    }

    /// Builds the environment registry.
    ///
    /// Without an `environments` table the built-in registry is used;
    /// `active_environment` applies either way.
    ///
    /// # Errors
    /// Returns `Environments` for an empty table or an unknown active id.
    pub fn registry(&self) -> Result<EnvironmentRegistry, ConfigError> {
        let mut registry = match &self.environments {
            None => EnvironmentRegistry::default(),
            Some(table) => {
                let active = self
                    .active_environment
                    .clone()
                    .or_else(|| table.keys().next().cloned())
                    .unwrap_or_default();
                EnvironmentRegistry::new(table.clone(), active)?
            }
        };

        if let Some(active) = &self.active_environment {
            registry.set_active(active)?;
        }
        Ok(registry)
    }
}

/// `<config_dir>/courier/config.toml`, if the platform has a config dir.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("courier").join("config.toml"))
}
