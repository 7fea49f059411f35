//! Catalog configuration types

use crate::{ConfigError, ConfigResult, LogLevel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file read from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "appCatalog.conf";

/// Service configuration
///
/// Keys are camelCase so existing `appCatalog.conf` files (`ipaDir`,
/// `serverPort`) load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    /// Directory scanned for `.ipa` bundles
    #[serde(default = "default_ipa_dir")]
    pub ipa_dir: PathBuf,

    /// TCP port the HTTP server listens on
    #[serde(default = "default_server_port")]
    pub server_port: u16,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Initial log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum requests handled at once
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_ipa_dir() -> PathBuf {
    PathBuf::from("./ipas")
}

fn default_server_port() -> u16 {
    8081
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_concurrent() -> usize {
    1000
}

fn default_request_timeout() -> u64 {
    30_000
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            ipa_dir: default_ipa_dir(),
            server_port: default_server_port(),
            bind_address: default_bind_address(),
            log_level: default_log_level(),
            max_concurrent_requests: default_max_concurrent(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl CatalogConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    ///
    /// Empty input yields the defaults.
    pub fn from_json(bytes: &[u8]) -> ConfigResult<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Read and parse a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_json(&bytes)
    }

    /// Load `path` if given, else [`DEFAULT_CONFIG_FILE`] when it exists, else defaults
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Parsed log level
    pub fn level(&self) -> ConfigResult<LogLevel> {
        self.log_level.parse()
    }

    /// Check that every value is usable
    pub fn validate(&self) -> ConfigResult<()> {
        if self.ipa_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("ipaDir must not be empty".to_string()));
        }
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "bindAddress must not be empty".to_string(),
            ));
        }
        if self.max_concurrent_requests == 0 {
            return Err(ConfigError::Invalid(
                "maxConcurrentRequests must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "requestTimeoutMs must be greater than zero".to_string(),
            ));
        }
        self.level()?;
        Ok(())
    }

    /// `bind_address:server_port`
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.server_port)
    }
}
