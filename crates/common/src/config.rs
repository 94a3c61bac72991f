//! Application configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Key-value storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Dispute workflow configuration.
    #[serde(default)]
    pub disputes: DisputeConfig,
    /// Analysis engine configuration.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which key-value backend persists the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackendKind {
    /// Process memory only; nothing survives a restart.
    Memory,
    /// One file per key under `storage.path`.
    #[default]
    File,
    /// Redis at `storage.redis_url`.
    Redis,
}

/// Key-value storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Backend selection.
    #[serde(default)]
    pub backend: StorageBackendKind,
    /// Directory for the file backend.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    /// Redis connection URL for the redis backend.
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
    /// Prefix prepended to every storage key.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

/// Dispute workflow configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisputeConfig {
    /// Region code embedded in human-readable dispute IDs.
    #[serde(default = "default_region")]
    pub region: String,
    /// Minimum analysis confidence for automatic resolution.
    #[serde(default = "default_auto_resolve_threshold")]
    pub auto_resolve_threshold: f64,
    /// Capacity of the store's command channel.
    #[serde(default = "default_command_buffer")]
    pub command_buffer: usize,
}

/// Analysis engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Lower bound of the simulated inference latency, in milliseconds.
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    /// Upper bound of the simulated inference latency, in milliseconds.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Version tag recorded on every analysis.
    #[serde(default = "default_model_version")]
    pub model_version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_key_prefix() -> String {
    "bandhan".to_string()
}

fn default_region() -> String {
    "MH".to_string()
}

const fn default_auto_resolve_threshold() -> f64 {
    0.80
}

const fn default_command_buffer() -> usize {
    64
}

const fn default_min_delay_ms() -> u64 {
    2000
}

const fn default_max_delay_ms() -> u64 {
    5000
}

fn default_model_version() -> String {
    "bandhan-rules-v1".to_string()
}

fn default_log_filter() -> String {
    "bandhan=info".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::default(),
            path: default_storage_path(),
            redis_url: default_redis_url(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl Default for DisputeConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            auto_resolve_threshold: default_auto_resolve_threshold(),
            command_buffer: default_command_buffer(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            model_version: default_model_version(),
        }
    }
}

impl AnalysisConfig {
    /// Configuration with no simulated latency.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            min_delay_ms: 0,
            max_delay_ms: 0,
            ..Self::default()
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` in the working directory, if present
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `BANDHAN_ENV`)
    /// 4. Environment variables with `BANDHAN__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        // A missing .env file is normal outside development.
        let _ = dotenvy::dotenv();

        let env = std::env::var("BANDHAN_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BANDHAN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("BANDHAN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
