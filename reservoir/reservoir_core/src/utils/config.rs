//! Pool configuration.
//!
//! Configuration is read from a TOML file. Every field has a default, so an
//! empty file (or no file at all) yields a usable fail-fast pool.
//!
//! ```toml
//! name = "inference"
//! log_level = "info"
//!
//! [exhaustion]
//! mode = "block"
//! timeout_ms = 500
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::utils::logging::LogLevel;

/// What `get` does when no resource is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Fail immediately with `PoolExhausted`.
    FailFast,

    /// Wait for a release, giving up after `timeout_ms`.
    ///
    /// Waiters are served in arrival order.
    Block {
        /// Longest time a caller waits before failing with `Timeout`
        timeout_ms: u64,
    },
}

impl Default for ExhaustionPolicy {
    fn default() -> Self {
        Self::FailFast
    }
}

impl ExhaustionPolicy {
    /// How long `get` may block, or `None` for fail-fast.
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            Self::FailFast => None,
            Self::Block { timeout_ms } => Some(Duration::from_millis(*timeout_ms)),
        }
    }
}

/// Configuration for a model pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Name used in log lines
    #[serde(default = "default_name")]
    pub name: String,

    /// Behaviour of `get` on an empty free set
    #[serde(default)]
    pub exhaustion: ExhaustionPolicy,

    /// Verbosity the command line installs when no flag overrides it
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_name() -> String {
    "model-pool".to_string()
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            exhaustion: ExhaustionPolicy::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl PoolConfig {
    /// A default configuration whose `get` blocks for up to `timeout`.
    ///
    /// Timeouts beyond `u64::MAX` milliseconds are clamped to it.
    pub fn blocking(timeout: Duration) -> Self {
        Self {
            exhaustion: ExhaustionPolicy::Block {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            },
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    ConfigError::LoadFailed(format!("{}: {}", path.display(), e))
                })?;
                Self::from_toml(&content)?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text without validating it.
    pub fn from_toml(content: &str) -> std::result::Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("Pool name cannot be empty".to_string()));
        }

        if let ExhaustionPolicy::Block { timeout_ms: 0 } = self.exhaustion {
            return Err(ConfigError::Invalid(
                "Blocking timeout cannot be zero; use mode = \"fail_fast\" instead".to_string(),
            ));
        }

        Ok(())
    }
}
