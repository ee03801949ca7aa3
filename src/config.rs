//! Cellar configuration.

use std::{env, fs, path::Path, path::PathBuf};

use serde::Deserialize;

use crate::{error::ConfigError, types::MAX_NAME_LEN};

/// Environment variable overriding [`CellarConfig::recipe_dir`].
pub const RECIPE_DIR_ENV: &str = "ALCHEMIST_RECIPE_DIR";

/// Settings shared by the cellar facade and its stores.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CellarConfig {
    /// Directory for the filesystem store.
    pub recipe_dir: PathBuf,
    /// Record file extension, without the dot.
    pub extension: String,
    /// Largest import accepted, in bytes.
    pub max_import_bytes: usize,
    /// Shortest generated default name.
    pub generated_name_min: usize,
    /// Longest generated default name.
    pub generated_name_max: usize,
}

impl Default for CellarConfig {
    fn default() -> Self {
        Self {
            recipe_dir: PathBuf::from("recipes"),
            extension: "recipe".to_string(),
            max_import_bytes: 1024 * 1024,
            generated_name_min: 20,
            generated_name_max: MAX_NAME_LEN,
        }
    }
}

impl CellarConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Loads `path` (defaults when none is given), then applies environment
    /// overrides. A given path that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_toml_str(&fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = env::var(RECIPE_DIR_ENV) {
            if !dir.is_empty() {
                self.recipe_dir = PathBuf::from(dir);
            }
        }
    }

    /// Generated name length bounds, clamped to the name rules.
    pub fn generated_name_range(&self) -> (usize, usize) {
        let max = self.generated_name_max.clamp(1, MAX_NAME_LEN);
        let min = self.generated_name_min.clamp(1, max);
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = CellarConfig::from_toml_str("max_import_bytes = 2048\n").unwrap();
        assert_eq!(config.max_import_bytes, 2048);
        assert_eq!(config.extension, "recipe");
        assert_eq!(config.recipe_dir, PathBuf::from("recipes"));
    }

    #[test]
    fn unknown_types_fail() {
        assert!(CellarConfig::from_toml_str("max_import_bytes = \"lots\"\n").is_err());
    }

    #[test]
    fn generated_range_is_clamped() {
        let config = CellarConfig {
            generated_name_min: 0,
            generated_name_max: 500,
            ..CellarConfig::default()
        };
        assert_eq!(config.generated_name_range(), (1, MAX_NAME_LEN));
    }

    #[test]
    fn no_path_means_defaults() {
        let config = CellarConfig::load(None).unwrap();
        assert_eq!(config.extension, CellarConfig::default().extension);
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("absent.toml");
        assert!(matches!(
            CellarConfig::load(Some(missing.as_path())),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn given_file_is_read() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("alchemist.toml");
        fs::write(&path, "extension = \"brew\"\n").unwrap();
        let config = CellarConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.extension, "brew");
    }
}
