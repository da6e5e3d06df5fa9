//! Configuration file support for stagecue.
//!
//! Configuration lives in a `config.toml` either passed on the command
//! line or found in the root of the data source. Every field has a
//! default, so a missing file or a sparse one both work.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stagecue_core::Zoom;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display appearance
    pub display: DisplayConfig,
    /// Input bindings
    pub input: InputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// A present-but-unreadable file is an error; the caller decides
    /// whether to fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}

/// Display-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Initial zoom level
    pub zoom: f32,
    /// Zoom bounds and step
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub zoom_step: f32,
    /// Colors as `#RRGGBB` hex strings
    pub font_color: String,
    pub background_color: String,
    pub chord_color: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            zoom_min: Zoom::DEFAULT_MIN,
            zoom_max: Zoom::DEFAULT_MAX,
            zoom_step: Zoom::DEFAULT_STEP,
            font_color: "#FFFFFF".to_string(),
            background_color: "#000000".to_string(),
            chord_color: "#FFFF00".to_string(),
        }
    }
}

impl DisplayConfig {
    /// Build the zoom state from the configured value and bounds.
    pub fn zoom(&self) -> Zoom {
        Zoom::with_bounds(self.zoom, self.zoom_min, self.zoom_max, self.zoom_step)
    }
}

/// Combined input configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub keyboard: KeyBindings,
    pub pedal: PedalConfig,
}

/// Key names bound to each action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
    pub next_song: Vec<String>,
    pub prev_song: Vec<String>,
    pub first_page: Vec<String>,
    pub last_page: Vec<String>,
    pub quit: Vec<String>,
    pub zoom_in: Vec<String>,
    pub zoom_out: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        fn names(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }
        Self {
            next_page: names(&["RIGHT", "PAGEDOWN", "SPACE"]),
            prev_page: names(&["LEFT", "PAGEUP"]),
            next_song: names(&["DOWN"]),
            prev_song: names(&["UP"]),
            first_page: names(&["HOME"]),
            last_page: names(&["END"]),
            quit: names(&["ESCAPE", "q"]),
            zoom_in: names(&["PLUS", "KP_PLUS"]),
            zoom_out: names(&["MINUS", "KP_MINUS"]),
        }
    }
}

/// Pedal input configuration.
///
/// When enabled, SIGUSR1 turns the page forward and SIGUSR2 backward, so
/// any pedal daemon or test harness can drive the prompter with `kill`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PedalConfig {
    pub enabled: bool,
}

/// Parse a `#RRGGBB` hex color into an RGB triple.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!((config.display.zoom - 1.0).abs() < 1e-6);
        assert_eq!(config.display.font_color, "#FFFFFF");
        assert_eq!(config.input.keyboard.next_page, vec!["RIGHT", "PAGEDOWN", "SPACE"]);
        assert!(!config.input.pedal.enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            "[display]\n\
             zoom = 1.5\n\
             chord_color = \"#00FF00\"\n\
             \n\
             [input.pedal]\n\
             enabled = true\n",
        )
        .unwrap();
        assert!((config.display.zoom - 1.5).abs() < 1e-6);
        assert_eq!(config.display.chord_color, "#00FF00");
        // Untouched sections keep their defaults.
        assert_eq!(config.display.font_color, "#FFFFFF");
        assert_eq!(config.input.keyboard.quit, vec!["ESCAPE", "q"]);
        assert!(config.input.pedal.enabled);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nzoom = 2.0\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!((config.display.zoom - 2.0).abs() < 1e-6);

        // Corrupt config is an error, not a silent default.
        std::fs::write(&path, "display = zoom").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_zoom_from_config_is_clamped() {
        let display = DisplayConfig {
            zoom: 99.0,
            ..DisplayConfig::default()
        };
        assert!((display.zoom().value() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFFF00"), Some((255, 255, 0)));
        assert_eq!(parse_hex_color("102030"), Some((16, 32, 48)));
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.display.font_color, config.display.font_color);
        assert_eq!(back.input.keyboard.next_song, config.input.keyboard.next_song);
    }
}
