//! Game configuration, loadable from JSON.

use crate::grid::PlayerId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Board dimensions, win threshold and player count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub n_rows: usize,
    pub n_columns: usize,
    /// Run length needed to win
    pub connect_n: usize,
    pub n_players: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            n_rows: 6,
            n_columns: 7,
            connect_n: 4,
            n_players: 2,
        }
    }
}

impl GameConfig {
    pub fn new(n_rows: usize, n_columns: usize, connect_n: usize, n_players: usize) -> Self {
        Self {
            n_rows,
            n_columns,
            connect_n,
            n_players,
        }
    }

    /// Check that a game built from this configuration is playable and
    /// winnable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_rows == 0 || self.n_columns == 0 {
            return Err(ConfigError::Validation(
                "n_rows and n_columns must be > 0".into(),
            ));
        }
        if self.connect_n < 2 {
            return Err(ConfigError::Validation("connect_n must be >= 2".into()));
        }
        if self.connect_n > self.n_rows.max(self.n_columns) {
            return Err(ConfigError::Validation(format!(
                "connect_n ({}) must be <= max(n_rows, n_columns) ({})",
                self.connect_n,
                self.n_rows.max(self.n_columns)
            )));
        }
        if self.n_players < 2 {
            return Err(ConfigError::Validation("n_players must be >= 2".into()));
        }
        if self.n_players > PlayerId::MAX as usize {
            return Err(ConfigError::Validation(format!(
                "n_players must be <= {}",
                PlayerId::MAX
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON document; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Load configuration from a JSON file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(
                "Config file '{}' not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config, GameConfig::new(6, 7, 4, 2));
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "connect_n": 5 }"#).unwrap();
        assert_eq!(config, GameConfig::new(6, 7, 5, 2));
    }

    #[test]
    fn test_empty_json_uses_all_defaults() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_validation_rejects_zero_dimensions() {
        assert!(GameConfig::new(0, 7, 4, 2).validate().is_err());
        assert!(GameConfig::new(6, 0, 4, 2).validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unwinnable_connect_n() {
        assert!(GameConfig::new(6, 7, 8, 2).validate().is_err());
        assert!(GameConfig::new(6, 7, 1, 2).validate().is_err());
        // A run along the longer dimension is enough
        assert!(GameConfig::new(3, 7, 7, 2).validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_player_count() {
        assert!(GameConfig::new(6, 7, 4, 1).validate().is_err());
        assert!(GameConfig::new(6, 7, 4, 256).validate().is_err());
        assert!(GameConfig::new(6, 7, 4, 3).validate().is_ok());
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        let err = GameConfig::from_json(r#"{ "n_rows": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = GameConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            GameConfig::load_or_default(Path::new("nonexistent_connect_config.json")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "connect_core_config_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "n_rows": 8, "n_columns": 9 }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config, GameConfig::new(8, 9, 4, 2));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::Validation("connect_n must be >= 2".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: connect_n must be >= 2"
        );
    }
}
