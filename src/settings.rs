//! Host settings
//!
//! Loaded from an optional JSON file. Missing fields take their defaults, so a
//! file only needs the keys it wants to change.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::renderer::RenderOptions;

/// Errors raised while loading a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Host settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
    /// Simulated frame rate; each tick advances `1 / target_fps` seconds
    pub target_fps: u32,
    /// Longest a single session may run before it is cut off (seconds)
    pub session_secs: f32,
    /// Runs to play back to back
    pub sessions: u32,
    /// Drive the ship with the built-in demo controller
    pub autopilot: bool,

    // === Visual Effects ===
    /// Particle effects (explosions, sparks)
    pub particles: bool,

    // === Accessibility ===
    /// Reduced motion (no damage flicker)
    pub reduced_motion: bool,

    // === Logging ===
    /// Seconds of game time between HUD log lines
    pub log_interval_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            target_fps: 60,
            session_secs: 120.0,
            sessions: 1,
            autopilot: true,

            particles: true,

            reduced_motion: false,

            log_interval_secs: 5.0,
        }
    }
}

impl Settings {
    /// Seconds advanced per tick
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.target_fps as f32
    }

    /// Upper bound on ticks for one session
    pub fn max_ticks(&self) -> u64 {
        (self.session_secs * self.target_fps as f32).ceil() as u64
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            particles: self.particles,
            reduced_motion: self.reduced_motion,
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.target_fps == 0 || self.target_fps > 1000 {
            return Err(SettingsError::Invalid {
                field: "target_fps",
                reason: format!("{} is outside 1..=1000", self.target_fps),
            });
        }
        if !(self.session_secs.is_finite() && self.session_secs > 0.0) {
            return Err(SettingsError::Invalid {
                field: "session_secs",
                reason: format!("{} must be a positive duration", self.session_secs),
            });
        }
        if !(self.log_interval_secs.is_finite() && self.log_interval_secs > 0.0) {
            return Err(SettingsError::Invalid {
                field: "log_interval_secs",
                reason: format!("{} must be positive", self.log_interval_secs),
            });
        }
        Ok(())
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }
}
