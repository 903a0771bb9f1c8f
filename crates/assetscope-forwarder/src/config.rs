//! Configuration file parsing for the Forwarder.
//!
//! Loads settings from TOML files including bind address, model name, the
//! environment variable holding the inference credential, and upload limits.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Forwarder configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Field present but unusable
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Forwarder configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ForwarderConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 3000)
    pub bind_port: u16,

    /// Gemini model used for extraction
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the inference API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Maximum accepted request body, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Directory for spooled uploads (system temp dir when unset)
    #[serde(default)]
    pub upload_dir: Option<PathBuf>,

    /// Timeout for a single inference call, in seconds
    #[serde(default = "default_inference_timeout")]
    pub inference_timeout_secs: u64,
}

fn default_model() -> String {
    assetscope_llm::gemini::DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    "API_KEY".to_string()
}

/// Default body limit: 25 MiB
fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_inference_timeout() -> u64 {
    assetscope_llm::gemini::DEFAULT_TIMEOUT_SECS
}

impl ForwarderConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ForwarderConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key_env.trim().is_empty() {
            return Err(ConfigError::MissingField("api_key_env".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::MissingField("model".to_string()));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "max_upload_bytes".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.inference_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "inference_timeout_secs".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Create a default configuration for local development
    pub fn default_test_config() -> Self {
        ForwarderConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 3000,
            model: default_model(),
            api_key_env: default_api_key_env(),
            max_upload_bytes: default_max_upload_bytes(),
            upload_dir: None,
            inference_timeout_secs: default_inference_timeout(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Inference timeout as a Duration
    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_secs)
    }

    /// Read the inference credential from the environment
    ///
    /// Blank values count as not provisioned.
    pub fn credential(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ForwarderConfig::default_test_config();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 3000);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.api_key_env, "API_KEY");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_addr() {
        let config = ForwarderConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            model = "gemini-2.0-flash"
            api_key_env = "GEMINI_API_KEY"
            max_upload_bytes = 1048576
            upload_dir = "/var/tmp/assetscope"
            inference_timeout_secs = 30
        "#;

        let config: ForwarderConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.max_upload_bytes, 1_048_576);
        assert_eq!(config.upload_dir, Some(PathBuf::from("/var/tmp/assetscope")));
        assert_eq!(config.inference_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_toml_defaults() {
        let toml = r#"
            bind_address = "127.0.0.1"
            bind_port = 8080
        "#;

        let config: ForwarderConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.max_upload_bytes, 25 * 1024 * 1024);
        assert!(config.upload_dir.is_none());
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let mut config = ForwarderConfig::default_test_config();
        config.max_upload_bytes = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validate_rejects_blank_env_name() {
        let mut config = ForwarderConfig::default_test_config();
        config.api_key_env = " ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_credential_missing() {
        let mut config = ForwarderConfig::default_test_config();
        config.api_key_env = "ASSETSCOPE_TEST_UNSET_CREDENTIAL".to_string();
        assert!(config.credential().is_none());
    }
}
