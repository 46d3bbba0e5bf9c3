//! Codec configuration.
//!
//! The only tunable is the payload capacity of one HCI message. It defaults
//! to the value the WiMOD firmware is built with and can be loaded from YAML:
//!
//! ```yaml
//! payload_capacity: 300
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PAYLOAD_CAPACITY;
use crate::error::ConfigError;

/// Codec configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct HciConfig {
    /// Maximum payload bytes in one envelope (excluding SAP and message id).
    pub payload_capacity: usize,
}

impl Default for HciConfig {
    fn default() -> Self {
        HciConfig {
            payload_capacity: DEFAULT_PAYLOAD_CAPACITY,
        }
    }
}

impl HciConfig {
    /// Create a configuration with the given payload capacity.
    pub fn with_capacity(payload_capacity: usize) -> Result<Self, ConfigError> {
        let config = HciConfig { payload_capacity };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: HciConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every field is within range.
    ///
    /// Data submission needs room for the port byte plus at least one data
    /// byte, and the length field of the HCI frame is 16 bits wide.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=u16::MAX as usize).contains(&self.payload_capacity) {
            return Err(ConfigError::Invalid(format!(
                "payload_capacity must be in 2..={}, got {}",
                u16::MAX,
                self.payload_capacity
            )));
        }
        Ok(())
    }
}
