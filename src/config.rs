//! Scanner configuration.
//!
//! ```yaml
//! snippet_limit: 80
//! ```

use serde::{Deserialize, Serialize};

use crate::diagnostics::ScanError;

/// Characters of unconsumed input kept in an `UnexpectedToken` error.
pub const DEFAULT_SNIPPET_LIMIT: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScannerConfig {
    pub snippet_limit: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            snippet_limit: DEFAULT_SNIPPET_LIMIT,
        }
    }
}

impl ScannerConfig {
    pub fn with_snippet_limit(mut self, limit: usize) -> Self {
        self.snippet_limit = limit;
        self
    }

    /// Parses and validates a YAML document; missing fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ScanError> {
        let config: ScannerConfig = serde_yaml::from_str(yaml).map_err(|e| ScanError::Config {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.snippet_limit == 0 {
            return Err(ScanError::config("snippet_limit must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_missing_fields() {
        let config = ScannerConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ScannerConfig::default());
    }

    #[test]
    fn test_snippet_limit_from_yaml() {
        let config = ScannerConfig::from_yaml_str("snippet_limit: 16\n").unwrap();
        assert_eq!(config.snippet_limit, 16);
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let err = ScannerConfig::from_yaml_str("snippet_limit: 0\n").unwrap_err();
        assert!(matches!(err, ScanError::Config { .. }));
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = ScannerConfig::from_yaml_str("snippet: 3\n").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
