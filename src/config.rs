//! Configuration for bucket
//!
//! Centralized configuration with sensible defaults. Deployed nodes read
//! their settings from the environment (see [`Config::from_env`]); the
//! builder exists for tests and embedders.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{BucketError, Result};

/// Environment variable names
pub mod env {
    pub const CLIENT_HOST: &str = "BUCKET_CLIENT_HOST";
    pub const CLIENT_PORT: &str = "BUCKET_CLIENT_PORT";
    pub const SERVER_HOST: &str = "BUCKET_SERVER_HOST";
    pub const SERVER_PORT: &str = "BUCKET_SERVER_PORT";
    pub const ROOT: &str = "BUCKET_ROOT";
    pub const TIMEOUT_SECS: &str = "BUCKET_TIMEOUT_SECS";
}

pub const DEFAULT_CLIENT_HOST: &str = "localhost";
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 61535;
pub const DEFAULT_ROOT: &str = ".bucket";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5 * 60;

/// Main configuration for a bucket node
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all stored entries
    /// Internal structure mirrors the keys:
    ///   {root}/
    ///     ├── plain_key
    ///     └── reports/
    ///         └── jan
    pub root: PathBuf,

    // -------------------------------------------------------------------------
    // Server Configuration
    // -------------------------------------------------------------------------
    /// Bind host for the listener
    pub server_host: String,

    /// Bind port for the listener
    pub server_port: u16,

    // -------------------------------------------------------------------------
    // Client Configuration
    // -------------------------------------------------------------------------
    pub client: ClientConfig,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Inactivity timeout applied to every accepted connection
    pub timeout: Duration,
}

/// Where a client connects to
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_CLIENT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// `host:port` form, as accepted by `TcpStream::connect`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_PORT,
            client: ClientConfig::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Load the configuration from `BUCKET_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`] but with an injectable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let timeout = match lookup(env::TIMEOUT_SECS) {
            Some(raw) => Duration::from_secs(parse_number(env::TIMEOUT_SECS, &raw)?),
            None => defaults.timeout,
        };

        let client = ClientConfig {
            host: lookup(env::CLIENT_HOST).unwrap_or(defaults.client.host),
            port: match lookup(env::CLIENT_PORT) {
                Some(raw) => parse_number(env::CLIENT_PORT, &raw)?,
                None => defaults.client.port,
            },
            timeout,
        };

        Ok(Self {
            root: lookup(env::ROOT).map(PathBuf::from).unwrap_or(defaults.root),
            server_host: lookup(env::SERVER_HOST).unwrap_or(defaults.server_host),
            server_port: match lookup(env::SERVER_PORT) {
                Some(raw) => parse_number(env::SERVER_PORT, &raw)?,
                None => defaults.server_port,
            },
            client,
            timeout,
        })
    }

    /// `host:port` the listener binds to
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| BucketError::Config(format!("{name}: {raw:?} is not a valid number")))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the storage root directory
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root = path.into();
        self
    }

    /// Set the listener bind host
    pub fn server_host(mut self, host: impl Into<String>) -> Self {
        self.config.server_host = host.into();
        self
    }

    /// Set the listener bind port (0 picks an ephemeral port)
    pub fn server_port(mut self, port: u16) -> Self {
        self.config.server_port = port;
        self
    }

    /// Set the host clients connect to
    pub fn client_host(mut self, host: impl Into<String>) -> Self {
        self.config.client.host = host.into();
        self
    }

    /// Set the port clients connect to
    pub fn client_port(mut self, port: u16) -> Self {
        self.config.client.port = port;
        self
    }

    /// Set the socket inactivity timeout for both sides
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self.config.client.timeout = timeout;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
