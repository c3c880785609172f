//! Configuration persistence for wavedeck settings

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::PaletteColor;
use crate::gesture::ClassifierConfig;

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveDeckConfig {
    /// Minimum detector confidence for a hand to drive gestures
    pub min_confidence: f32,
    /// How long a finger vector must hold steady before firing (ms)
    pub debounce_ms: u64,
    /// Suppression window after a gesture fires (ms)
    pub cooldown_ms: u64,
    /// Brush width in output pixels
    pub brush_size: f32,
    /// Per-stroke opacity (0.0-1.0)
    pub opacity: f32,
    /// Drawing palette, cycled by the change-color gesture
    pub palette: Vec<PaletteColor>,
    /// Light palette used while blackboard mode is active
    pub blackboard_palette: Vec<PaletteColor>,
    /// Screenshot output width in pixels
    pub screenshot_width: u32,
    /// Screenshot output height in pixels
    pub screenshot_height: u32,
    /// Data root for the JSON store; None picks the platform data dir
    pub data_dir: Option<PathBuf>,
}

impl Default for WaveDeckConfig {
    fn default() -> Self {
        Self {
            // Matches the detector's own default tracking threshold
            min_confidence: 0.5,
            debounce_ms: 120,
            cooldown_ms: 700,
            brush_size: 5.0,
            opacity: 1.0,
            palette: vec![
                PaletteColor::new("Red", 0.9, 0.1, 0.1),
                PaletteColor::new("Green", 0.1, 0.8, 0.1),
                PaletteColor::new("Blue", 0.1, 0.2, 0.9),
                PaletteColor::new("Yellow", 0.9, 0.9, 0.1),
            ],
            blackboard_palette: vec![
                PaletteColor::new("White", 1.0, 1.0, 1.0),
                PaletteColor::new("Gray", 0.8, 0.8, 0.8),
                PaletteColor::new("Light Cyan", 0.6, 1.0, 1.0),
                PaletteColor::new("Light Magenta", 1.0, 0.6, 1.0),
            ],
            screenshot_width: 1920,
            screenshot_height: 1080,
            data_dir: None,
        }
    }
}

impl WaveDeckConfig {
    fn config_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("wavedeck").join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("invalid config at {}, using defaults: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            log::error!("no config directory available; settings not saved");
            return;
        };
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_vec_pretty(self).expect("config serializes");
            fs::write(&path, json)
        };
        if let Err(err) = write() {
            log::error!("failed to save config to {}: {err}", path.display());
        }
    }

    /// Classifier tuning derived from the configured windows
    pub fn classifier(&self) -> ClassifierConfig {
        ClassifierConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            cooldown: Duration::from_millis(self.cooldown_ms),
            ..ClassifierConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn config_round_trips_through_json() {
        let config = WaveDeckConfig {
            brush_size: 9.0,
            cooldown_ms: 450,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: WaveDeckConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: WaveDeckConfig = serde_json::from_str("{\"brush_size\": 3.0}").unwrap();
        assert_eq!(config.brush_size, 3.0);
        assert_eq!(config.cooldown_ms, WaveDeckConfig::default().cooldown_ms);
        assert_eq!(config.palette.len(), 4);
    }
}
