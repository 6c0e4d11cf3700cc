use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    preset::{Preset, PresetStore},
    store::write_atomic,
};

const APP_NAME: &str = "wake_timer";

fn default_time_format() -> String {
    "%l:%M %p".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_time_format")]
    pub time_format: String,
    /// the preset catalogue, in pick-list order
    #[serde(default)]
    pub presets: Vec<Preset>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_format: default_time_format(),
            presets: vec![],
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// if the file can't be read or isn't valid toml
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = fs::read_to_string(path)?;
        Ok(toml::from_str(&config)?)
    }

    /// like [`Config::load`] but a missing file gives the default config
    ///
    /// # Errors
    /// if the file exists but can't be read or parsed
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// # Errors
    /// if the config can't be serialized or written
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let config = toml::to_string(self)?;
        write_atomic(path, &config)?;
        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs, ConfigError> {
        ProjectDirs::from("", "", APP_NAME).ok_or(ConfigError::NoHome)
    }

    /// # Errors
    /// if there is no home directory
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let mut path = Self::project_dirs()?.config_dir().to_path_buf();
        path.push("config.toml");
        Ok(path)
    }

    /// where the pending timer is kept
    ///
    /// # Errors
    /// if there is no home directory
    pub fn state_path() -> Result<PathBuf, ConfigError> {
        let mut path = Self::project_dirs()?.data_dir().to_path_buf();
        path.push("timer.toml");
        Ok(path)
    }

    #[must_use]
    pub fn is_config_present() -> bool {
        Self::config_path().is_ok_and(|path| path.exists())
    }
}

impl PresetStore for Config {
    fn find_by_name(&self, name: &str) -> Option<&Preset> {
        self.presets.find_by_name(name)
    }

    fn list_all(&self) -> &[Preset] {
        &self.presets
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::preset::PresetSound;

    #[test]
    fn save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let config = Config {
            presets: vec![Preset::new(
                "morning",
                vec![PresetSound::new(PathBuf::from("birds.mp3"), 60.0)],
            )],
            ..Config::default()
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_gives_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.list_all().is_empty());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [[presets]]
            name = "test"
            "#,
        )
        .unwrap();
        assert_eq!(config.time_format, "%l:%M %p");
        assert!(config.find_by_name("test").is_some());
    }

    #[test]
    fn bad_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "presets = 3").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }
}
