//! Player preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Last mute choice, restored at startup
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Behavior ===
    /// Pause when the tab is hidden or the window loses focus
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// Decode a stored record, falling back to defaults on garbage
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
                settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring corrupt settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "flappy_roket_settings";

    /// Load settings from LocalStorage
    pub fn load() -> Self {
        match crate::platform::storage::get_item(Self::STORAGE_KEY) {
            Some(json) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            if crate::platform::storage::set_item(Self::STORAGE_KEY, &json) {
                log::info!("Settings saved");
            }
        }
    }
}
