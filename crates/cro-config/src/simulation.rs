//! Simulated analysis backend configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_delay_ms() -> u64 {
    3000
}

const fn default_failure_probability() -> f64 {
    0.1
}

const fn default_confidence_min() -> f64 {
    0.70
}

const fn default_confidence_max() -> f64 {
    0.95
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Artificial processing delay before a result (or failure) is produced.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Probability in `[0, 1]` that a submission fails as "service unavailable".
    #[serde(default = "default_failure_probability")]
    pub failure_probability: f64,

    /// Lower bound of the uniformly drawn confidence score.
    #[serde(default = "default_confidence_min")]
    pub confidence_min: f64,

    /// Upper bound of the uniformly drawn confidence score.
    #[serde(default = "default_confidence_max")]
    pub confidence_max: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            failure_probability: default_failure_probability(),
            confidence_min: default_confidence_min(),
            confidence_max: default_confidence_max(),
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub const fn delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.delay_ms)
    }

    /// Check that every probability and bound lies in `[0, 1]` and the
    /// confidence range is not inverted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = 0.0..=1.0;
        if !unit.contains(&self.failure_probability) {
            return Err(ConfigError::invalid(
                "simulation.failure_probability",
                format!("must be within [0, 1], got {}", self.failure_probability),
            ));
        }
        if !unit.contains(&self.confidence_min) {
            return Err(ConfigError::invalid(
                "simulation.confidence_min",
                format!("must be within [0, 1], got {}", self.confidence_min),
            ));
        }
        if !unit.contains(&self.confidence_max) {
            return Err(ConfigError::invalid(
                "simulation.confidence_max",
                format!("must be within [0, 1], got {}", self.confidence_max),
            ));
        }
        if self.confidence_min > self.confidence_max {
            return Err(ConfigError::invalid(
                "simulation.confidence_min",
                "must not exceed simulation.confidence_max",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = SimulationConfig::default();
        assert_eq!(config.delay_ms, 3000);
        assert!((config.failure_probability - 0.1).abs() < f64::EPSILON);
        assert!((config.confidence_min - 0.70).abs() < f64::EPSILON);
        assert!((config.confidence_max - 0.95).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_probability_above_one() {
        let config = SimulationConfig {
            failure_probability: 1.2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_confidence_bounds() {
        let config = SimulationConfig {
            confidence_min: 0.9,
            confidence_max: 0.8,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn equal_bounds_are_allowed() {
        let config = SimulationConfig {
            confidence_min: 0.8,
            confidence_max: 0.8,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
