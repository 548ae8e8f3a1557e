//! Configuration for the gaze pointer agent.

use crate::engine::policy::{
    SpeedPolicy, DEFAULT_FAR_SPEED, DEFAULT_NEAR_RADIUS_PX, DEFAULT_NEAR_SPEED,
    DEFAULT_RESTING_SPEED,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gaze-to-cursor radius (pixels) below which precision speed applies
    pub near_radius_px: f64,

    /// Pointer speeds used by the proximity policy
    pub speeds: SpeedSettings,

    /// Path for storing telemetry state
    pub data_path: PathBuf,

    /// Whether speed adaptation is currently paused
    pub paused: bool,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gaze-pointer-agent");

        Self {
            near_radius_px: DEFAULT_NEAR_RADIUS_PX,
            speeds: SpeedSettings::default(),
            data_path: data_dir,
            paused: false,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gaze-pointer-agent")
            .join("config.json")
    }

    /// Ensure all required directories exist.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.data_path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Build the speed policy this configuration describes. Out-of-range
    /// speeds are clamped by the policy constructor.
    pub fn policy(&self) -> SpeedPolicy {
        SpeedPolicy::new(
            self.near_radius_px,
            self.speeds.near,
            self.speeds.far,
            self.speeds.resting,
        )
    }
}

/// Raw pointer speeds for the proximity policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedSettings {
    /// Speed while the cursor is near the fixation point
    pub near: u8,
    /// Speed while the cursor is far from the fixation point
    pub far: u8,
    /// Speed applied when a fixation ends
    pub resting: u8,
}

impl Default for SpeedSettings {
    fn default() -> Self {
        Self {
            near: DEFAULT_NEAR_SPEED,
            far: DEFAULT_FAR_SPEED,
            resting: DEFAULT_RESTING_SPEED,
        }
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.near_radius_px, 100.0);
        assert_eq!(config.speeds.near, 1);
        assert_eq!(config.speeds.far, 20);
        assert_eq!(config.speeds.resting, 14);
        assert!(!config.paused);
    }

    #[test]
    fn test_policy_from_config() {
        let config = Config {
            near_radius_px: 50.0,
            ..Config::default()
        };
        let policy = config.policy();
        assert_eq!(policy.near_threshold_sq(), 2500.0);
        assert_eq!(policy.resting().get(), 14);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.near_radius_px, config.near_radius_px);
        assert_eq!(parsed.speeds.far, config.speeds.far);
    }
}
