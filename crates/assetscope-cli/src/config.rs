//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use assetscope_batch::BatchConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Forwarder base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Per-file deadline and request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum files uploaded at once
    #[serde(default = "default_max_concurrent_files")]
    pub max_concurrent_files: usize,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the config file and REPL history.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".assetscope"))
    }

    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from file or create default.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a specific file, or defaults if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Set the forwarder URL after a basic sanity check.
    pub fn set_endpoint(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CliError::InvalidInput(format!(
                "Endpoint must start with http:// or https:// (got '{}')",
                url
            )));
        }
        self.endpoint = url.trim_end_matches('/').to_string();
        Ok(())
    }

    /// Batch settings derived from the CLI settings.
    pub fn batch_config(&self) -> Result<BatchConfig> {
        let config = BatchConfig {
            per_file_timeout_secs: self.settings.timeout_secs,
            max_concurrent_files: self.settings.max_concurrent_files,
        };
        config.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Request timeout for the extraction client.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.settings.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            timeout_secs: default_timeout_secs(),
            max_concurrent_files: default_max_concurrent_files(),
            history_size: default_history_size(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:3000".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_timeout_secs() -> u64 {
    180
}

fn default_max_concurrent_files() -> usize {
    8
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.endpoint, "http://localhost:3000");
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.batch_config().unwrap(), BatchConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set_endpoint("https://assets.example.org/").unwrap();
        config.settings.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.endpoint, "https://assets.example.org");
        assert_eq!(loaded.settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let config: Config = toml::from_str(
            r#"
            endpoint = "http://10.1.1.1:3000"

            [settings]
            max_concurrent_files = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.settings.max_concurrent_files, 2);
        assert_eq!(config.settings.timeout_secs, 180);
        assert!(config.settings.color);
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let mut config = Config::default();
        assert!(config.set_endpoint("localhost:3000").is_err());
        assert_eq!(config.endpoint, "http://localhost:3000");
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = Config::default();
        config.settings.max_concurrent_files = 0;
        assert!(config.batch_config().is_err());
    }
}
