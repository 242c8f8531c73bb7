//! Plane tracker configuration.
//!
//! ```toml
//! # Planes emitted as added or updated per tick.
//! max_output = 5
//! ```

use arbridge_shared::DEFAULT_MAX_PLANES;
use serde::{Deserialize, Serialize};

use crate::error::{PlaneError, PlaneResult};

/// Configuration for [`crate::PlaneTracker`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaneTrackerConfig {
    /// Cap on planes emitted as added or updated per tick.
    ///
    /// Removed planes never count against it.
    pub max_output: usize,
}

impl Default for PlaneTrackerConfig {
    fn default() -> Self {
        Self {
            max_output: DEFAULT_MAX_PLANES,
        }
    }
}

impl PlaneTrackerConfig {
    /// Sets the per-tick cap.
    #[must_use]
    pub const fn with_max_output(mut self, max_output: usize) -> Self {
        self.max_output = max_output;
        self
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`PlaneError::InvalidConfig`] if `max_output` is zero.
    pub fn validate(&self) -> PlaneResult<()> {
        if self.max_output == 0 {
            return Err(PlaneError::InvalidConfig(
                "max_output must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`PlaneError::ConfigParse`] for malformed TOML or unknown
    /// keys, and [`PlaneError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> PlaneResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| PlaneError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cap_is_five() {
        let config = PlaneTrackerConfig::default();
        assert_eq!(config.max_output, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_and_defaults() {
        let config = PlaneTrackerConfig::from_toml_str("max_output = 8").unwrap();
        assert_eq!(config.max_output, 8);

        let empty = PlaneTrackerConfig::from_toml_str("").unwrap();
        assert_eq!(empty, PlaneTrackerConfig::default());
    }

    #[test]
    fn test_zero_cap_rejected() {
        let err = PlaneTrackerConfig::from_toml_str("max_output = 0").unwrap_err();
        assert!(matches!(err, PlaneError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = PlaneTrackerConfig::from_toml_str("max_planes = 3").unwrap_err();
        assert!(matches!(err, PlaneError::ConfigParse(_)));
    }
}
