//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and scanning behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,
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

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        let base = Url::parse(&self.crawler.base_url)?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(AppError::validation(format!(
                "crawler.base_url must be http(s), got '{}'",
                self.crawler.base_url
            )));
        }
        Ok(())
    }
}

/// HTTP client and scan behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Root of the download site hosting the release trees
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

mod defaults {
    pub fn base_url() -> String {
        "https://downloads.openwrt.org".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; openwrt-matrix/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.crawler.base_url, "https://downloads.openwrt.org");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [crawler]
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.crawler.timeout_secs, 5);
        assert_eq!(config.crawler.user_agent, defaults::user_agent());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.crawler.base_url = "not a url".into();
        assert!(config.validate().is_err());

        config.crawler.base_url = "ftp://downloads.openwrt.org".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.crawler.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
