//! Ripple scene settings and preferences
//!
//! Persisted as JSON (a file on native, LocalStorage on the web).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings JSON is invalid: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live trail particles for this preset
    pub fn max_trail_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 1024,
        }
    }

    /// Segments per circle when tessellating draw commands
    pub fn gradient_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 24,
            QualityPreset::Medium => 48,
            QualityPreset::High => 96,
        }
    }
}

/// Feature flags polled by the scene on every event and frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub haptics: bool,
    pub trails: bool,
    pub multi_color: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Settings::default().flags()
    }
}

/// Ripple scene preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Haptic pulse on press and release
    pub haptics: bool,
    /// Leave trail particles along drags
    pub particle_trails: bool,
    /// Cycle the palette per ripple (off: always the first color)
    pub multi_color: bool,
    /// Let the ambient audio level pump ripple size and glow
    pub audio_reactive: bool,
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Glow intensity of the ripple centre (0.0 - 1.0)
    pub glow_intensity: f32,

    // === Accessibility ===
    /// Reduced motion (no trails, no audio pumping)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            haptics: true,
            particle_trails: false,
            multi_color: true,
            audio_reactive: true,
            quality: QualityPreset::Medium,
            glow_intensity: 0.75,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective feature flags (respects reduced_motion)
    pub fn flags(&self) -> FeatureFlags {
        FeatureFlags {
            haptics: self.haptics,
            trails: self.particle_trails && !self.reduced_motion,
            multi_color: self.multi_color,
        }
    }

    /// Audio level the scene should actually use; missing or malformed levels count as 0
    pub fn effective_audio_level(&self, level: Option<f32>) -> f32 {
        if !self.audio_reactive || self.reduced_motion {
            return 0.0;
        }
        crate::sim::physics::clamp_unit(level.unwrap_or(0.0))
    }

    /// Glow intensity clamped to `[0, 1]`
    pub fn effective_glow_intensity(&self) -> f32 {
        crate::sim::physics::clamp_unit(self.glow_intensity)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write settings as pretty JSON
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Best-effort load: falls back to defaults and logs why
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "neon_ripple_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}
