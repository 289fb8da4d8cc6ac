use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::detection::BruteForceDetector;

/// Errors from loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Configuration for the scanner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input source configuration
    pub input: InputConfig,
    /// Detection parameters
    pub detection: DetectionConfig,
    /// Output configuration
    pub output: OutputConfig,
}

/// Input source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the auth log to scan
    pub auth_log_path: PathBuf,
}

/// Detection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Sliding window length in minutes
    pub window_minutes: i64,
    /// Failed attempts within the window required to flag a source
    pub threshold: usize,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "text" or "json"
    pub format: String,
    /// Output file path (stdout when unset)
    pub file_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: InputConfig {
                auth_log_path: PathBuf::from("/var/log/auth.log"),
            },
            detection: DetectionConfig {
                window_minutes: BruteForceDetector::DEFAULT_WINDOW_MINUTES,
                threshold: BruteForceDetector::DEFAULT_THRESHOLD,
            },
            output: OutputConfig {
                format: "text".to_string(),
                file_path: None,
            },
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: &PathBuf) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_detector_defaults() {
        let config = Config::default();

        assert_eq!(config.detection.window_minutes, 5);
        assert_eq!(config.detection.threshold, 5);
        assert_eq!(config.output.format, "text");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.input.auth_log_path, config.input.auth_log_path);
        assert_eq!(parsed.detection.window_minutes, config.detection.window_minutes);
        assert_eq!(parsed.detection.threshold, config.detection.threshold);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authwatch.toml");

        let mut config = Config::default();
        config.detection.threshold = 8;
        config.to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.detection.threshold, 8);
    }
}
