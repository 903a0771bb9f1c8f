//! Configuration for the batch orchestrator

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the batch orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum time for one file's extraction, upload included (seconds)
    pub per_file_timeout_secs: u64,

    /// Maximum files in flight at once
    pub max_concurrent_files: usize,
}

impl BatchConfig {
    /// Get the per-file timeout as a Duration
    pub fn per_file_timeout(&self) -> Duration {
        Duration::from_secs(self.per_file_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.per_file_timeout_secs == 0 {
            return Err("per_file_timeout_secs must be greater than 0".to_string());
        }
        if self.max_concurrent_files == 0 {
            return Err("max_concurrent_files must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            per_file_timeout_secs: 180,
            max_concurrent_files: 8,
        }
    }
}
