//! Registry configuration and its YAML persistence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{HandOffPolicy, MissingTargetPolicy};

/// Tab registry configuration.
///
/// Every field has a default, so a partial (or empty) YAML file is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RegistryConfig {
    /// Neighbour activation when a tab is removed
    pub hand_off: HandOffPolicy,
    /// Reaction to a missing active tab or unknown id
    pub missing_target: MissingTargetPolicy,
}

impl RegistryConfig {
    /// Load configuration from the default path, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("Registry config not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        log::info!("Loading registry config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty mapping
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(contents)?)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        log::debug!("Saved registry config to {:?}", path);
        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("reqtab").join("registry.yaml")
            } else {
                PathBuf::from("registry.yaml")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // ~/.config/reqtab/registry.yaml on every Unix-like platform
            if let Some(home_dir) = dirs::home_dir() {
                home_dir
                    .join(".config")
                    .join("reqtab")
                    .join("registry.yaml")
            } else {
                PathBuf::from("registry.yaml")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.hand_off, HandOffPolicy::Always);
        assert_eq!(config.missing_target, MissingTargetPolicy::Error);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = RegistryConfig::from_yaml_str("hand_off: active_only\n").unwrap();
        assert_eq!(config.hand_off, HandOffPolicy::ActiveOnly);
        assert_eq!(config.missing_target, MissingTargetPolicy::Error);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = RegistryConfig::from_yaml_str("").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let result = RegistryConfig::from_yaml_str("hand_off: sometimes\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("absent.yaml");
        let config = RegistryConfig::load_from(&path).unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("registry.yaml");
        let config = RegistryConfig {
            hand_off: HandOffPolicy::ActiveOnly,
            missing_target: MissingTargetPolicy::Ignore,
        };

        config.save_to(&path).expect("Failed to save config");
        assert!(!path.with_extension("yaml.tmp").exists());

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("hand_off: active_only"));
        assert_eq!(RegistryConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_config_path_file_name() {
        let path = RegistryConfig::config_path();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("registry.yaml")
        );
    }
}
