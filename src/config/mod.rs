//! Configuration management for lookout
//!
//! This module handles loading and validating configuration from environment
//! variables, TOML files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::client::DEFAULT_BASE_URL;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Lookup client configuration
    pub lookup: LookupConfig,

    /// Batch runner configuration
    pub runner: RunnerConfig,

    /// Profile cache configuration
    pub cache: CacheConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Lookup client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Base URL of the lookup service
    pub base_url: String,

    /// Rate limit (requests per second)
    pub rate_limit: u32,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent string
    pub user_agent: String,
}

/// Batch runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Artificial per-lookup delay in milliseconds (0 disables it)
    pub simulated_delay_ms: u64,
}

/// Profile cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable the profile cache for single lookups
    pub enabled: bool,

    /// Maximum number of cached profiles
    pub capacity: usize,

    /// Entry time-to-live in seconds
    pub ttl_secs: u64,

    /// Key prefix for namespacing
    pub key_prefix: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("LOOKOUT_BASE_URL")
            .unwrap_or_else(|_| String::from(DEFAULT_BASE_URL));

        let rate_limit = std::env::var("LOOKOUT_RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let request_timeout_secs = std::env::var("LOOKOUT_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let user_agent = std::env::var("LOOKOUT_USER_AGENT")
            .unwrap_or_else(|_| format!("lookout/{}", env!("CARGO_PKG_VERSION")));

        let simulated_delay_ms = std::env::var("LOOKOUT_SIMULATED_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let cache_enabled = std::env::var("LOOKOUT_CACHE_ENABLED")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true);

        let cache_capacity = std::env::var("LOOKOUT_CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(256);

        let cache_ttl_secs = std::env::var("LOOKOUT_CACHE_TTL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(3600);

        let key_prefix =
            std::env::var("LOOKOUT_CACHE_PREFIX").unwrap_or_else(|_| String::from("lookout"));

        let log_level = std::env::var("LOOKOUT_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("LOOKOUT_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            lookup: LookupConfig {
                base_url,
                rate_limit,
                request_timeout_secs,
                user_agent,
            },
            runner: RunnerConfig { simulated_delay_ms },
            cache: CacheConfig {
                enabled: cache_enabled,
                capacity: cache_capacity,
                ttl_secs: cache_ttl_secs,
                key_prefix,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.lookup.base_url.is_empty() {
            anyhow::bail!("base_url must not be empty");
        }

        if self.lookup.rate_limit == 0 {
            anyhow::bail!("rate_limit must be greater than 0");
        }

        if self.lookup.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.cache.capacity == 0 {
            anyhow::bail!("cache capacity must be greater than 0");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup.request_timeout_secs)
    }

    /// Get artificial lookup delay as Duration
    #[must_use]
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.runner.simulated_delay_ms)
    }

    /// Get cache entry TTL as Duration
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookup: LookupConfig {
                base_url: String::from(DEFAULT_BASE_URL),
                rate_limit: 10,
                request_timeout_secs: 30,
                user_agent: format!("lookout/{}", env!("CARGO_PKG_VERSION")),
            },
            runner: RunnerConfig {
                simulated_delay_ms: 0,
            },
            cache: CacheConfig {
                enabled: true,
                capacity: 256,
                ttl_secs: 3600,
                key_prefix: String::from("lookout"),
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}
