use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use moodline_common::timeline::DEFAULT_HALF_WIDTH;
use moodline_common::{Geometry, Timings};

use crate::error::{MoodlineError, Result};

/// RGB color values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Theme color palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Secondary text, labels of days far from the selection
    pub muted: Rgb,
    /// The anchor day ("today")
    pub today: Rgb,
    /// Highlight behind the selected day
    pub selected: Rgb,
    /// Selected day while a drag is in progress
    pub dragging: Rgb,
    /// Status line values
    pub info: Rgb,
    /// Pending auto-return countdown
    pub warning: Rgb,
    /// Recorded moods
    pub success: Rgb,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            muted: Rgb::new(140, 140, 140),
            today: Rgb::new(253, 224, 71),
            selected: Rgb::new(50, 50, 70),
            dragging: Rgb::new(216, 180, 254),
            info: Rgb::new(147, 197, 253),
            warning: Rgb::new(252, 129, 129),
            success: Rgb::new(134, 239, 172),
        }
    }
}

impl ThemeColors {
    /// Catppuccin Mocha theme
    pub fn catppuccin_mocha() -> Self {
        Self {
            muted: Rgb::new(166, 173, 200),    // Subtext0
            today: Rgb::new(249, 226, 175),    // Yellow
            selected: Rgb::new(69, 71, 90),    // Surface1
            dragging: Rgb::new(203, 166, 247), // Mauve
            info: Rgb::new(137, 180, 250),     // Blue
            warning: Rgb::new(243, 139, 168),  // Red
            success: Rgb::new(166, 227, 161),  // Green
        }
    }

    /// Catppuccin Latte theme (light theme)
    pub fn catppuccin_latte() -> Self {
        Self {
            muted: Rgb::new(108, 111, 133),    // Subtext0
            today: Rgb::new(223, 142, 29),     // Yellow
            selected: Rgb::new(204, 208, 218), // Surface0
            dragging: Rgb::new(136, 57, 239),  // Mauve
            info: Rgb::new(30, 102, 245),      // Blue
            warning: Rgb::new(210, 15, 57),    // Red
            success: Rgb::new(64, 160, 43),    // Green
        }
    }

    /// High contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            muted: Rgb::new(200, 200, 200),
            today: Rgb::new(255, 255, 0),
            selected: Rgb::new(0, 0, 160),
            dragging: Rgb::new(255, 0, 255),
            info: Rgb::new(0, 255, 255),
            warning: Rgb::new(255, 0, 0),
            success: Rgb::new(0, 255, 0),
        }
    }

    /// Get theme by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace(['-', '_', ' '], "") {
            s if s == "default" => Some(Self::default()),
            s if s == "catppuccinmocha" => Some(Self::catppuccin_mocha()),
            s if s == "catppuccinlatte" => Some(Self::catppuccin_latte()),
            s if s == "highcontrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }
}

/// Theme configuration - either a preset name or custom colors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeConfig {
    Preset(String),
    Custom(ThemeColors),
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig::Preset("default".to_string())
    }
}

impl ThemeConfig {
    pub fn resolve(&self) -> ThemeColors {
        match self {
            ThemeConfig::Preset(name) => ThemeColors::from_name(name).unwrap_or_default(),
            ThemeConfig::Custom(colors) => colors.clone(),
        }
    }
}

/// Configuration settings for moodline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Days shown on each side of today
    #[serde(default = "default_half_width")]
    pub half_width: u16,

    #[serde(default)]
    pub geometry: Geometry,

    #[serde(default)]
    pub timings: Timings,

    /// UI refresh interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u64,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_half_width() -> u16 {
    DEFAULT_HALF_WIDTH
}

fn default_tick_rate() -> u64 {
    16
}

impl Default for Config {
    fn default() -> Self {
        Self {
            half_width: default_half_width(),
            geometry: Geometry::default(),
            timings: Timings::default(),
            tick_rate: default_tick_rate(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Get the config file path (~/.moodline.json)
    pub fn config_file_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".moodline.json"))
            .ok_or(MoodlineError::NoHomeDirectory)
    }

    /// Ensure the config file exists, creating it with defaults if not
    fn ensure_config_file(path: &Path) -> Result<()> {
        if !path.exists() {
            let data = serde_json::to_string_pretty(&Config::default())?;
            fs::write(path, data)?;
        }
        Ok(())
    }

    /// Load configuration from ~/.moodline.json, merging with defaults
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::ensure_config_file(&path)?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;
        self.timings.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.half_width, 7);
        assert_eq!(config.tick_rate, 16);
        assert_eq!(config.timings, Timings::default());
        assert_eq!(config.geometry, Geometry::default());
        assert_eq!(config.theme.resolve(), ThemeColors::default());
    }

    #[test]
    fn camel_case_keys_are_read() {
        let json = r#"{
            "halfWidth": 3,
            "geometry": { "itemWidth": 7, "itemMargin": 2 },
            "timings": { "autoReturnMs": 9000, "dragGraceMs": 300 },
            "tickRate": 33,
            "theme": "catppuccin-mocha"
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.half_width, 3);
        assert_eq!(config.geometry.pitch(), 11.0);
        assert_eq!(config.timings.auto_return_ms, 9000);
        assert_eq!(config.timings.drag_grace_ms, 300);
        assert_eq!(config.timings.tap_grace_ms, 400);
        assert_eq!(config.tick_rate, 33);
        assert_eq!(config.theme.resolve(), ThemeColors::catppuccin_mocha());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_preset_falls_back_to_default() {
        let theme = ThemeConfig::Preset("solarized".to_string());
        assert_eq!(theme.resolve(), ThemeColors::default());
        assert_eq!(
            ThemeColors::from_name("High Contrast"),
            Some(ThemeColors::high_contrast())
        );
    }

    #[test]
    fn custom_theme_colors_deserialize() {
        let json = r#"{ "theme": {
            "muted": { "r": 1, "g": 2, "b": 3 },
            "today": { "r": 4, "g": 5, "b": 6 },
            "selected": { "r": 7, "g": 8, "b": 9 },
            "dragging": { "r": 10, "g": 11, "b": 12 },
            "info": { "r": 13, "g": 14, "b": 15 },
            "warning": { "r": 16, "g": 17, "b": 18 },
            "success": { "r": 19, "g": 20, "b": 21 }
        } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.theme.resolve().today, Rgb::new(4, 5, 6));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let json = r#"{ "geometry": { "itemWidth": -2 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(matches!(config.validate(), Err(MoodlineError::Common(_))));

        let json = r#"{ "timings": { "autoReturnMs": 100 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_reads_file() {
        let path = std::env::temp_dir()
            .join(format!("moodline-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "halfWidth": 2 }"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.half_width, 2);
    }
}
