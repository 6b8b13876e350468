//! Calculator configuration
//!
//! Every field has a default, so an empty YAML document is a valid config.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::number::{DEFAULT_PRECISION, MAX_PRECISION};

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating a config
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid YAML for [`CalculatorConfig`]
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A field holds an unusable value
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// What is wrong
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid-value error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Tunables shared by the session and every adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Error auto-clear delay in milliseconds
    pub recovery_delay_ms: u64,
    /// How long a pressed button stays highlighted, in milliseconds
    pub press_feedback_ms: u64,
    /// Decimal places kept by calculate and the preview
    pub precision: u32,
    /// Display length beyond which exponent notation is used
    pub scientific_threshold: usize,
    /// Fraction digits in exponent notation
    pub exponent_digits: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            recovery_delay_ms: 2000,
            press_feedback_ms: 150,
            precision: DEFAULT_PRECISION,
            scientific_threshold: 15,
            exponent_digits: 6,
        }
    }
}

impl CalculatorConfig {
    /// Parses and validates a YAML document
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] for malformed input and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file can't be read, otherwise as
    /// [`Self::from_yaml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Checks field ranges
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::invalid(format!(
                "precision must be at most {MAX_PRECISION}, got {}",
                self.precision
            )));
        }
        if self.recovery_delay_ms == 0 {
            return Err(ConfigError::invalid("recovery_delay_ms must be positive"));
        }
        Ok(())
    }

    /// Builder-style override of the recovery delay
    #[must_use]
    pub const fn with_recovery_delay_ms(mut self, ms: u64) -> Self {
        self.recovery_delay_ms = ms;
        self
    }

    /// Error auto-clear delay
    #[must_use]
    pub const fn recovery_delay(&self) -> Duration {
        Duration::from_millis(self.recovery_delay_ms)
    }

    /// Button press highlight duration
    #[must_use]
    pub const fn press_feedback(&self) -> Duration {
        Duration::from_millis(self.press_feedback_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.recovery_delay(), Duration::from_millis(2000));
        assert_eq!(config.press_feedback(), Duration::from_millis(150));
        assert_eq!(config.precision, 9);
        assert_eq!(config.scientific_threshold, 15);
        assert_eq!(config.exponent_digits, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = CalculatorConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, CalculatorConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let config = CalculatorConfig::from_yaml_str("recovery_delay_ms: 500\nprecision: 4\n").unwrap();
        assert_eq!(config.recovery_delay_ms, 500);
        assert_eq!(config.precision, 4);
        assert_eq!(config.press_feedback_ms, 150);
    }

    #[test]
    fn test_rejects_excess_precision() {
        let err = CalculatorConfig::from_yaml_str("precision: 16").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("precision"));
    }

    #[test]
    fn test_rejects_zero_delay() {
        let err = CalculatorConfig::from_yaml_str("recovery_delay_ms: 0").unwrap_err();
        assert!(err.to_string().contains("recovery_delay_ms"));
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        let err = CalculatorConfig::from_yaml_str("precision: [nine]").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_override_delay() {
        let config = CalculatorConfig::default().with_recovery_delay_ms(750);
        assert_eq!(config.recovery_delay(), Duration::from_millis(750));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "press_feedback_ms: 90").unwrap();

        let config = CalculatorConfig::from_path(file.path()).unwrap();
        assert_eq!(config.press_feedback_ms, 90);
    }

    #[test]
    fn test_from_missing_path() {
        let err = CalculatorConfig::from_path("/nonexistent/keypad-calc.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
