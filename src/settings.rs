//! Startup configuration
//!
//! Loaded once from an optional JSON file in the working directory; the
//! game never writes it back.

use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Default settings file name, looked up in the working directory
pub const SETTINGS_FILE: &str = "toro-blast.json";

/// Game settings/preferences
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,
    /// Show the FPS counter in the HUD
    pub show_fps: bool,
    /// Fixed session seed for reproducible runs (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            show_fps: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file is the normal case and
    /// yields the defaults; a malformed one is logged and ignored.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring malformed settings file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
