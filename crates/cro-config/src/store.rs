//! Report store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default retention capacity (`MAX_REPORTS`).
pub const DEFAULT_MAX_REPORTS: usize = 5;

const fn default_max_reports() -> usize {
    DEFAULT_MAX_REPORTS
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Maximum number of reports retained, newest first.
    #[serde(default = "default_max_reports")]
    pub max_reports: usize,

    /// Location of the durable slot file. Empty means the platform data dir.
    #[serde(default)]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_reports: default_max_reports(),
            path: String::new(),
        }
    }
}

impl StoreConfig {
    /// Resolve the slot file location.
    ///
    /// Falls back to `<data_dir>/cro/reports.json`, then to
    /// `.cro/reports.json` relative to the working directory when the
    /// platform has no data dir.
    #[must_use]
    pub fn slot_path(&self) -> PathBuf {
        if !self.path.trim().is_empty() {
            return PathBuf::from(self.path.trim());
        }
        dirs::data_dir().map_or_else(
            || PathBuf::from(".cro").join("reports.json"),
            |dir| dir.join("cro").join("reports.json"),
        )
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_reports == 0 {
            return Err(ConfigError::invalid("store.max_reports", "must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = StoreConfig::default();
        assert_eq!(config.max_reports, 5);
        assert!(config.path.is_empty());
        assert!(config.slot_path().ends_with("reports.json"));
    }

    #[test]
    fn explicit_path_wins() {
        let config = StoreConfig {
            path: "/tmp/cro/history.json".into(),
            ..Default::default()
        };
        assert_eq!(config.slot_path(), PathBuf::from("/tmp/cro/history.json"));
    }
}
