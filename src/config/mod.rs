//! Configuration management.
//!
//! Settings come from an optional TOML file, then environment variables
//! prefixed with `ADS_CLASSIC_` (nested keys separated by `__`), then
//! built-in defaults. The API token falls back to `ADS_TOKEN`.
//!
//! ```toml
//! [api]
//! endpoint = "https://api.adsabs.harvard.edu/v1/search/query"
//! token = "your-ads-token"
//! timeout_secs = 60
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//!
//! [query]
//! default_rows = 2000
//! default_sort = "NDATE"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{SortMode, DEFAULT_ROWS};
use crate::sources::ADS_API_ENDPOINT;

/// Environment variable holding the API token
pub const TOKEN_ENV_VAR: &str = "ADS_TOKEN";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub query: QueryConfig,
}

impl Config {
    /// The API token, if one is configured
    pub fn token(&self) -> Option<&str> {
        self.api.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Search API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    ADS_API_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Defaults applied to incoming queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_rows")]
    pub default_rows: usize,

    /// Classic sort name; unrecognized names mean the API's own ordering
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_rows: default_rows(),
            default_sort: default_sort(),
        }
    }
}

impl QueryConfig {
    pub fn sort(&self) -> Option<SortMode> {
        SortMode::from_classic(&self.default_sort)
    }
}

fn default_rows() -> usize {
    DEFAULT_ROWS
}

fn default_sort() -> String {
    "NDATE".to_string()
}

/// Load configuration from an optional file plus the environment
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }
    let settings = builder
        .add_source(
            config::Environment::with_prefix("ADS_CLASSIC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: Config = settings.try_deserialize()?;
    if config.token().is_none() {
        config.api.token = std::env::var(TOKEN_ENV_VAR).ok();
    }
    Ok(config)
}

/// Look for a configuration file in the working directory, then in the
/// user's config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("ads-classic.toml");
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("ads-classic").join("config.toml"))
        .filter(|path| path.is_file())
}
