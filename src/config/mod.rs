//! Configuration module for the GreenLens backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default request body limit for uploads (16 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Which persistence backend holds the user/leaderboard document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Pretty-printed JSON document on disk
    Json,
    /// Single-row SQLite table
    Sqlite,
    /// Process memory only, lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StoreBackend::Json),
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Invalid {
                var: "GREENLENS_STORE",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreBackend::Json => "json",
            StoreBackend::Sqlite => "sqlite",
            StoreBackend::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Persistence backend for the document
    pub store_backend: StoreBackend,
    /// Path to the JSON document (json backend)
    pub data_file: PathBuf,
    /// Path to the SQLite database file (sqlite backend)
    pub db_path: PathBuf,
    /// Directory uploaded images are written to
    pub upload_dir: PathBuf,
    /// External classifier command line, split shell-style
    pub model_command: Option<String>,
    /// Upper bound on a single model invocation
    pub model_timeout: Option<Duration>,
    /// Request body limit for `/api/scan`
    pub max_upload_bytes: usize,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let bind_addr = parse_var("GREENLENS_BIND_ADDR", "0.0.0.0:5000")?;
        let store_backend = env::var("GREENLENS_STORE")
            .unwrap_or_else(|_| "json".to_string())
            .parse()?;

        let data_file = env::var("GREENLENS_DATA_FILE")
            .unwrap_or_else(|_| "data.json".to_string())
            .into();

        let db_path = env::var("GREENLENS_DB_PATH")
            .unwrap_or_else(|_| "./data/greenlens.sqlite".to_string())
            .into();

        let upload_dir = env::var("GREENLENS_UPLOAD_DIR")
            .unwrap_or_else(|_| "uploads".to_string())
            .into();

        let model_command = env::var("GREENLENS_MODEL_COMMAND")
            .ok()
            .filter(|cmd| !cmd.trim().is_empty());

        let model_timeout = match env::var("GREENLENS_MODEL_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.trim().parse().map_err(|_| {
                ConfigError::Invalid {
                    var: "GREENLENS_MODEL_TIMEOUT_SECS",
                    value: raw.clone(),
                }
            })?)),
            Err(_) => None,
        };

        let max_upload_bytes = parse_var(
            "GREENLENS_MAX_UPLOAD_BYTES",
            &DEFAULT_MAX_UPLOAD_BYTES.to_string(),
        )?;

        let log_level = env::var("GREENLENS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            bind_addr,
            store_backend,
            data_file,
            db_path,
            upload_dir,
            model_command,
            model_timeout,
            max_upload_bytes,
            log_level,
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: &str) -> Result<T, ConfigError> {
    let raw = env::var(var).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value: raw })
}
