//! Game settings and preferences
//!
//! Read once at startup from a JSON file. Every field has a default, so a
//! partial file is fine and a missing one means "all defaults".

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::persistence::DEFAULT_HIGH_SCORE_FILE;

/// Settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "space-dodger.json";
/// Environment variable overriding the settings file path
pub const SETTINGS_ENV_VAR: &str = "SPACE_DODGER_SETTINGS";

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Whether to render the scrolling starfield
    pub fn starfield_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }

    /// Whether the background gradient animates (flat fill otherwise)
    pub fn animated_gradient(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }

    /// Whether sprites are sampled with rotation (upright blit otherwise)
    pub fn rotate_craft(&self) -> bool {
        matches!(self, QualityPreset::High | QualityPreset::Medium)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Accessibility ===
    /// Reduced motion (static background, no explosion flash)
    pub reduced_motion: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Files ===
    /// Directory holding sprites and sound cues
    pub asset_dir: PathBuf,
    /// Plain-text file holding the best score
    pub high_score_path: PathBuf,

    /// Fixed RNG seed for reproducible runs (entropy when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            reduced_motion: false,
            show_fps: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            asset_dir: PathBuf::from("assets"),
            high_score_path: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
            seed: None,
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

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Settings file path: the environment override or the default name
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load from [`Settings::default_path`], falling back to defaults
    pub fn load() -> Self {
        Self::load_or_default(&Self::default_path())
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    /// Volume applied to sound effects, 0 when muted
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective starfield (respects reduced_motion)
    pub fn effective_starfield(&self) -> bool {
        self.quality.starfield_enabled() && !self.reduced_motion
    }

    /// Effective gradient animation (respects reduced_motion)
    pub fn effective_gradient(&self) -> bool {
        self.quality.animated_gradient() && !self.reduced_motion
    }

    /// Effective explosion flash (respects reduced_motion)
    pub fn effective_explosion(&self) -> bool {
        !self.reduced_motion
    }
}
