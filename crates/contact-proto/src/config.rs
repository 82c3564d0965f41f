use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Popup geometry and glyphs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Popup width as a percentage of the terminal width.
    #[serde(default = "default_width_percent")]
    pub width_percent: u16,
    /// Maximum number of rows visible before the list scrolls.
    #[serde(default = "default_max_visible_rows")]
    pub max_visible_rows: u16,
    #[serde(default = "default_divider")]
    pub divider: String,
    /// Glyph for a secondary button whose action has no icon of its own.
    #[serde(default = "default_alternate_icon")]
    pub default_alternate_icon: String,
    #[serde(default = "default_show_keys")]
    pub show_keys: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Action file used when none is given on the command line.
    #[serde(default = "default_actions_file")]
    pub actions_file: PathBuf,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width_percent: default_width_percent(),
            max_visible_rows: default_max_visible_rows(),
            divider: default_divider(),
            default_alternate_icon: default_alternate_icon(),
            show_keys: default_show_keys(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            actions_file: default_actions_file(),
        }
    }
}

fn default_title() -> String {
    "contact".to_string()
}

fn default_width_percent() -> u16 {
    60
}

fn default_max_visible_rows() -> u16 {
    8
}

fn default_divider() -> String {
    "│".to_string()
}

fn default_alternate_icon() -> String {
    "»".to_string()
}

fn default_show_keys() -> bool {
    true
}

fn default_actions_file() -> PathBuf {
    platform::config_dir().join("actions.toml")
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}
