//! Layered runtime configuration.
//!
//! Values resolve with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`--config`, or `taskgate.toml` in the working
//!    directory when present)
//! 4. Compiled defaults

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "taskgate.toml";
const ID_PLACEHOLDER: &str = "{id}";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// A resolved value is out of range or malformed.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        /// Dotted configuration key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Output format of log events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    user_service: UserServiceFileConfig,
    database: DatabaseFileConfig,
    logging: LoggingFileConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct UserServiceFileConfig {
    base_url: Option<String>,
    exists_path: Option<String>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DatabaseFileConfig {
    url: Option<String>,
    max_connections: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LoggingFileConfig {
    level: Option<String>,
    format: Option<LogFormat>,
}

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// Configuration flags shared by every `taskgate` subcommand.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// Path to config file (default: `./taskgate.toml` when present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the user service.
    #[arg(long, global = true, env = "TASKGATE_USER_SERVICE_URL")]
    pub user_service_url: Option<String>,

    /// Timeout in milliseconds for a single user existence lookup.
    #[arg(long, global = true, env = "TASKGATE_USER_SERVICE_TIMEOUT_MS")]
    pub user_service_timeout_ms: Option<u64>,

    /// `PostgreSQL` connection URL of the task store.
    #[arg(long, global = true, env = "TASKGATE_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, global = true, env = "TASKGATE_LOG")]
    pub log_level: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Where and how to reach the user service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserServiceSettings {
    /// Scheme, host, and port of the user service.
    pub base_url: String,
    /// Path template of the existence endpoint; `{id}` is replaced.
    pub exists_path: String,
    /// Per-lookup timeout in milliseconds.
    pub timeout_ms: u64,
}

impl UserServiceSettings {
    /// Returns the per-lookup timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for UserServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".to_owned(),
            exists_path: "/api/users/exists/{id}".to_owned(),
            timeout_ms: 2000,
        }
    }
}

/// Task store connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Upper bound of pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/taskgate".to_owned(),
            max_connections: 8,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Fallback filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Pretty,
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    /// User service settings.
    pub user_service: UserServiceSettings,
    /// Task store settings.
    pub database: DatabaseSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

impl ServiceConfig {
    /// Loads configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// An explicit `--config` path must exist. Without one, a missing
    /// `taskgate.toml` is treated as an empty file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed,
    /// or if a resolved value is invalid.
    pub fn load(args: &ConfigArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(args.config.as_deref())?;
        let config = Self::resolve(args, file);
        config.validate()?;
        Ok(config)
    }

    fn resolve(args: &ConfigArgs, file: ConfigFile) -> Self {
        let defaults = Self::default();
        let ConfigFile {
            user_service,
            database,
            logging,
        } = file;

        Self {
            user_service: UserServiceSettings {
                base_url: args
                    .user_service_url
                    .clone()
                    .or(user_service.base_url)
                    .unwrap_or(defaults.user_service.base_url),
                exists_path: user_service
                    .exists_path
                    .unwrap_or(defaults.user_service.exists_path),
                timeout_ms: args
                    .user_service_timeout_ms
                    .or(user_service.timeout_ms)
                    .unwrap_or(defaults.user_service.timeout_ms),
            },
            database: DatabaseSettings {
                url: args
                    .database_url
                    .clone()
                    .or(database.url)
                    .unwrap_or(defaults.database.url),
                max_connections: database
                    .max_connections
                    .unwrap_or(defaults.database.max_connections),
            },
            logging: LoggingSettings {
                level: args
                    .log_level
                    .clone()
                    .or(logging.level)
                    .unwrap_or(defaults.logging.level),
                format: logging.format.unwrap_or(defaults.logging.format),
            },
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let base_url = &self.user_service.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "user_service.base_url",
                reason: format!("'{base_url}' is not an http or https URL"),
            });
        }
        if !self.user_service.exists_path.contains(ID_PLACEHOLDER) {
            return Err(ConfigError::InvalidValue {
                key: "user_service.exists_path",
                reason: format!("must contain the {ID_PLACEHOLDER} placeholder"),
            });
        }
        if self.user_service.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "user_service.timeout_ms",
                reason: "must be greater than zero".to_owned(),
            });
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "database.max_connections",
                reason: "must be greater than zero".to_owned(),
            });
        }
        Ok(())
    }
}

fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(path) = explicit_path {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let path = PathBuf::from(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(source) => Err(ConfigError::ReadFile { path, source }),
    }
}
