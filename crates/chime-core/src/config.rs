use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::platform;
use crate::error::{ChimeError, Result};

/// Contents of `config.toml`. Every field is optional; command-line flags
/// take precedence over anything set here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NotificationsConfig {
    /// Directory scanned recursively for `*NN.{wav,mp3,ogg}` files.
    #[serde(default)]
    pub input_dir: Option<PathBuf>,
    /// Hours added to the wall-clock hour before looking up a file.
    #[serde(default)]
    pub offset: i32,
    /// Active-hour boundaries; only the first two are used.
    #[serde(default = "default_active")]
    pub active: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlayerConfig {
    /// Path to ffplay. Looked up on PATH when unset.
    #[serde(default)]
    pub binary: Option<PathBuf>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            input_dir: None,
            offset: 0,
            active: default_active(),
        }
    }
}

fn default_active() -> Vec<i64> {
    vec![7, 22]
}

impl Config {
    /// Load the default config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ChimeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ChimeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.notifications.active, vec![7, 22]);
        assert_eq!(config.notifications.offset, 0);
        assert!(config.notifications.input_dir.is_none());
        assert!(config.player.binary.is_none());
        assert!(Config::config_path().ends_with("hourly-chime/config.toml"));
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            [notifications]
            input_dir = "/srv/chimes"
            offset = -9
            active = [22, 3]

            [player]
            binary = "/usr/local/bin/ffplay"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.notifications.input_dir.as_deref(),
            Some(Path::new("/srv/chimes"))
        );
        assert_eq!(config.notifications.offset, -9);
        assert_eq!(config.notifications.active, vec![22, 3]);
        assert_eq!(
            config.player.binary.as_deref(),
            Some(Path::new("/usr/local/bin/ffplay"))
        );
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = Config::parse("[notifications]\noffset = 2\n").unwrap();
        assert_eq!(config.notifications.offset, 2);
        assert_eq!(config.notifications.active, vec![7, 22]);
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let config = Config::load_from(Path::new("/nonexistent/hourly-chime/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        assert!(Config::parse("[notifications]\noffset = \"two\"\n").is_err());
    }
}
