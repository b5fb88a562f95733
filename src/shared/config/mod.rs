//! Application configuration module
//!
//! Configuration is layered: an optional TOML file (path taken from
//! `PARLEY_CONFIG`) is read first, then environment variables override
//! whatever the file set. `.env` loading is left to the binary.
//!
//! | Field                      | Env var                    | Default |
//! |----------------------------|----------------------------|---------|
//! | `http_port`                | `HTTP_PORT`                | 8000    |
//! | `database_url`             | `DATABASE_URL`             | none    |
//! | `database_max_connections` | `DATABASE_MAX_CONNECTIONS` | 10      |
//! | `jwt_secret`               | `JWT_SECRET`               | required|
//! | `token_ttl_hours`          | `TOKEN_TTL_HOURS`          | 24      |
//! | `bcrypt_cost`              | `BCRYPT_COST`              | 12      |
//! | `message_page_size`        | `MESSAGE_PAGE_SIZE`        | 5       |
//! | `store_timeout_secs`       | `STORE_TIMEOUT_SECS`       | 5       |

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "PARLEY_CONFIG";

pub const DEFAULT_HTTP_PORT: u16 = 8000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 24;
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365;
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;
pub const DEFAULT_MESSAGE_PAGE_SIZE: u32 = 5;
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;

#[derive(Clone)]
pub struct AppConfig {
    pub http_port: u16,
    /// `None` runs the server on the in-memory store
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl_hours: u64,
    pub bcrypt_cost: u32,
    pub message_page_size: u32,
    pub store_timeout_secs: u64,
}

impl AppConfig {
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load from the optional config file, then the process environment.
    pub fn load() -> Result<AppConfig, ConfigError> {
        let mut builder = AppConfig::builder();
        if let Some(path) = env_var::<PathBuf>(CONFIG_PATH_ENV)? {
            builder = builder.merge_file(&path)?;
        }
        builder.merge_env()?.build()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        if self.token_ttl_hours == 0 {
            return Err(ConfigError::invalid("token_ttl_hours", "must be greater than zero"));
        }
        if self.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(ConfigError::invalid("token_ttl_hours", "must be at most 8760 (one year)"));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::invalid("bcrypt_cost", "must be between 4 and 31"));
        }
        if self.message_page_size == 0 {
            return Err(ConfigError::invalid("message_page_size", "must be greater than zero"));
        }
        if self.store_timeout_secs == 0 {
            return Err(ConfigError::invalid("store_timeout_secs", "must be greater than zero"));
        }
        if self.database_max_connections == 0 {
            return Err(ConfigError::invalid(
                "database_max_connections",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_hours.saturating_mul(60 * 60))
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("http_port", &self.http_port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("database_max_connections", &self.database_max_connections)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("message_page_size", &self.message_page_size)
            .field("store_timeout_secs", &self.store_timeout_secs)
            .finish()
    }
}

/// On-disk shape of the TOML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    http_port: Option<u16>,
    database_url: Option<String>,
    database_max_connections: Option<u32>,
    jwt_secret: Option<String>,
    token_ttl_hours: Option<u64>,
    bcrypt_cost: Option<u32>,
    message_page_size: Option<u32>,
    store_timeout_secs: Option<u64>,
}

#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    http_port: Option<u16>,
    database_url: Option<String>,
    database_max_connections: Option<u32>,
    jwt_secret: Option<String>,
    token_ttl_hours: Option<u64>,
    bcrypt_cost: Option<u32>,
    message_page_size: Option<u32>,
    store_timeout_secs: Option<u64>,
}

impl AppConfigBuilder {
    pub fn http_port(mut self, port: u16) -> Self {
        self.http_port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn database_max_connections(mut self, max: u32) -> Self {
        self.database_max_connections = Some(max);
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn token_ttl_hours(mut self, hours: u64) -> Self {
        self.token_ttl_hours = Some(hours);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn message_page_size(mut self, size: u32) -> Self {
        self.message_page_size = Some(size);
        self
    }

    pub fn store_timeout_secs(mut self, secs: u64) -> Self {
        self.store_timeout_secs = Some(secs);
        self
    }

    /// Apply values from a TOML file. Keys present in the file replace
    /// anything set on the builder so far.
    pub fn merge_file(self, path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_toml(&raw)
    }

    pub fn merge_toml(mut self, raw: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(raw)?;
        self.http_port = file.http_port.or(self.http_port);
        self.database_url = file.database_url.or(self.database_url);
        self.database_max_connections = file
            .database_max_connections
            .or(self.database_max_connections);
        self.jwt_secret = file.jwt_secret.or(self.jwt_secret);
        self.token_ttl_hours = file.token_ttl_hours.or(self.token_ttl_hours);
        self.bcrypt_cost = file.bcrypt_cost.or(self.bcrypt_cost);
        self.message_page_size = file.message_page_size.or(self.message_page_size);
        self.store_timeout_secs = file.store_timeout_secs.or(self.store_timeout_secs);
        Ok(self)
    }

    /// Apply values from environment variables that are set.
    pub fn merge_env(mut self) -> Result<Self, ConfigError> {
        self.http_port = env_var("HTTP_PORT")?.or(self.http_port);
        self.database_url = env_var::<String>("DATABASE_URL")?
            .filter(|url| !url.is_empty())
            .or(self.database_url);
        self.database_max_connections =
            env_var("DATABASE_MAX_CONNECTIONS")?.or(self.database_max_connections);
        self.jwt_secret = env_var("JWT_SECRET")?.or(self.jwt_secret);
        self.token_ttl_hours = env_var("TOKEN_TTL_HOURS")?.or(self.token_ttl_hours);
        self.bcrypt_cost = env_var("BCRYPT_COST")?.or(self.bcrypt_cost);
        self.message_page_size = env_var("MESSAGE_PAGE_SIZE")?.or(self.message_page_size);
        self.store_timeout_secs = env_var("STORE_TIMEOUT_SECS")?.or(self.store_timeout_secs);
        Ok(self)
    }

    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            http_port: self.http_port.unwrap_or(DEFAULT_HTTP_PORT),
            database_url: self.database_url,
            database_max_connections: self
                .database_max_connections
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            jwt_secret: self.jwt_secret.ok_or(ConfigError::MissingValue("jwt_secret"))?,
            token_ttl_hours: self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
            message_page_size: self.message_page_size.unwrap_or(DEFAULT_MESSAGE_PAGE_SIZE),
            store_timeout_secs: self.store_timeout_secs.unwrap_or(DEFAULT_STORE_TIMEOUT_SECS),
        };
        config.validate()?;
        Ok(config)
    }
}

fn env_var<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::invalid(key, format!("cannot parse {:?}", value))),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => {
            Err(ConfigError::invalid(key, "value is not valid unicode"))
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
    #[error("cannot read config file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config file: {0}")]
    ParseFile(#[from] toml::de::Error),
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            reason: reason.into(),
        }
    }
}
