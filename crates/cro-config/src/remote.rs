//! Remote analysis backend configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default transport timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    String::from("cro/0.1")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Base address of the analysis service (e.g., `https://api.example.com`).
    /// Empty means no backend is configured and the simulated strategy runs.
    #[serde(default)]
    pub base_url: String,

    /// Request timeout enforced by the HTTP client, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl RemoteConfig {
    /// Whether a backend address has been supplied.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Base URL without trailing slashes, ready for path joining.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_configured() {
            return Ok(());
        }
        let base = self.normalized_base_url();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "remote.base_url",
                format!("must start with http:// or https://, got '{base}'"),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("remote.timeout_secs", "must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = RemoteConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = RemoteConfig {
            base_url: "https://api.example.com/v1//".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert_eq!(config.normalized_base_url(), "https://api.example.com/v1");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = RemoteConfig {
            base_url: "ftp://api.example.com".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn whitespace_only_base_url_is_not_configured() {
        let config = RemoteConfig {
            base_url: "   ".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }
}
