//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Batch resolution behavior
    #[serde(default)]
    pub batch: BatchConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Load a configuration file and validate it. Unlike `load_or_default`,
    /// a missing or unparseable file is an error.
    pub fn load_validated(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.batch.max_concurrent == 0 {
            return Err(AppError::validation("batch.max_concurrent must be > 0"));
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Batch resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum URLs resolved at once
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Abort the batch on the first failed URL instead of recording it as null
    #[serde(default)]
    pub fail_fast: bool,

    /// Log progress every N URLs (0 disables)
    #[serde(default = "defaults::progress_every")]
    pub progress_every: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: defaults::max_concurrent(),
            fail_fast: false,
            progress_every: defaults::progress_every(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        concat!("ark-resolver/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        4
    }
    pub fn progress_every() -> usize {
        25
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.batch.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[batch]\nfail_fast = true\n").unwrap();
        assert!(config.batch.fail_fast);
        assert_eq!(config.batch.max_concurrent, 4);
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("missing.toml"));
        assert_eq!(config.batch.max_concurrent, 4);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[http]\ntimeout_secs = 5\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.http.timeout_secs, 5);
    }

    #[test]
    fn load_validated_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[batch\nmax_concurrent = 0\n").unwrap();
        assert!(matches!(Config::load_validated(&path), Err(AppError::Toml(_))));
    }

    #[test]
    fn load_validated_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(Config::load_validated(&path), Err(AppError::Io(_))));
    }

    #[test]
    fn load_validated_checks_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[batch]\nmax_concurrent = 0\n").unwrap();
        assert!(matches!(Config::load_validated(&path), Err(AppError::Validation(_))));

        fs::write(&path, "[batch]\nmax_concurrent = 2\n").unwrap();
        assert_eq!(Config::load_validated(&path).unwrap().batch.max_concurrent, 2);
    }
}
