//! Engine configuration.
//!
//! This module provides the width profile a [`PartitionEngine`](crate::PartitionEngine)
//! runs under, with serialization to JSON and binary so a transport layer can
//! ship it next to its requests.
//!
//! # Profiles
//!
//! - **Fixed** (default): `max_width = 64`, the common instantiation
//! - **Wide**: any larger `max_width`, for callers chaining merges beyond a
//!   machine word
//!
//! # Example
//!
//! ```
//! use vorax::EngineConfig;
//!
//! let config = EngineConfig::wide(256).with_metadata("caller", "audit");
//! let json = config.to_json().unwrap();
//! let restored = EngineConfig::from_json(&json).unwrap();
//! assert_eq!(restored.max_width, 256);
//! ```

use crate::bitset::MAX_WIDTH;
use crate::error::{OperationError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_max_width() -> usize {
    MAX_WIDTH
}

/// Width profile and caller metadata for an engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Crate version that wrote this configuration
    #[serde(default = "default_version")]
    pub version: String,

    /// Largest width an operation may produce
    #[serde(default = "default_max_width")]
    pub max_width: usize,

    /// Optional metadata (caller name, deployment, etc.)
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl EngineConfig {
    /// Fixed 64-bit profile.
    pub fn new() -> Self {
        Self::wide(MAX_WIDTH)
    }

    /// Profile allowing outputs up to `max_width` bits.
    pub fn wide(max_width: usize) -> Self {
        Self {
            version: default_version(),
            max_width,
            metadata: HashMap::new(),
        }
    }

    /// Add metadata to the configuration.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Fail with `InvalidConfig` if the profile admits no width at all.
    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 {
            return Err(OperationError::InvalidConfig(
                "max_width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON string and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to binary (bincode).
    pub fn to_binary(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from binary (bincode) and validate.
    pub fn from_binary(data: &[u8]) -> Result<Self> {
        let config: Self = bincode::deserialize(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Write JSON to `path`.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read and validate JSON from `path`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let config = EngineConfig::default();
        assert_eq!(config.max_width, 64);
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig::wide(128).with_metadata("name", "wide engine");
        let json = config.to_json().unwrap();
        let restored = EngineConfig::from_json(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn test_binary_round_trip() {
        let config = EngineConfig::wide(512);
        let binary = config.to_binary().unwrap();
        assert_eq!(EngineConfig::from_binary(&binary).unwrap(), config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config.max_width, 64);
        assert!(config.metadata.is_empty());
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = EngineConfig::from_json(r#"{"max_width": 0}"#).unwrap_err();
        assert!(matches!(err, OperationError::InvalidConfig(_)));
    }
}
