//! Game settings
//!
//! Loaded from a JSON file; any missing key falls back to its default.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::SimConfig;

/// Errors loading or validating settings
#[derive(Debug)]
pub enum SettingsError {
    /// The file could not be read
    Io(std::io::Error),
    /// The file is not valid settings JSON
    Parse(serde_json::Error),
    /// A value is outside its usable range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "could not read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "could not parse settings: {}", e),
            SettingsError::Invalid { field, reason } => {
                write!(f, "invalid setting '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; `None` derives one from the clock
    pub seed: Option<u64>,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Rules ===
    pub starting_lives: u8,
    pub starting_level: u32,

    // === Loop ===
    /// Presentation frame rate; one simulation frame per tick
    pub target_fps: u32,
    /// Let the simulation steer the paddle (demo mode)
    pub autopilot: bool,
    /// Stop after this many frames (`None` = run until game over)
    pub max_frames: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            starting_lives: STARTING_LIVES,
            starting_level: 1,
            target_fps: TARGET_FPS,
            autopilot: true,
            max_frames: Some(60 * TARGET_FPS as u64),
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.field_width > 0.0) {
            return Err(SettingsError::Invalid {
                field: "field_width",
                reason: "must be positive",
            });
        }
        if !(self.field_height > 0.0) {
            return Err(SettingsError::Invalid {
                field: "field_height",
                reason: "must be positive",
            });
        }
        if self.starting_lives == 0 {
            return Err(SettingsError::Invalid {
                field: "starting_lives",
                reason: "must be at least 1",
            });
        }
        if self.target_fps == 0 {
            return Err(SettingsError::Invalid {
                field: "target_fps",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Simulation parameters, with the seed resolved
    pub fn sim_config(&self, fallback_seed: u64) -> SimConfig {
        SimConfig {
            seed: self.seed.unwrap_or(fallback_seed),
            field: Vec2::new(self.field_width, self.field_height),
            starting_lives: self.starting_lives,
            starting_level: self.starting_level.max(1),
        }
    }
}
