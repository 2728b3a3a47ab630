//! Startup settings
//!
//! Read once from an optional JSON file; never written back.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_SPEED_FACTOR, MIN_SPEED_FACTOR};
use crate::sim::PaddleShape;

/// Paddle shape and the collision response that goes with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaddleVariant {
    /// Flat paddles, horizontal bounce with offset spin
    #[default]
    Rectangle,
    /// Round paddle heads, mirror reflection about the contact normal
    Circle,
}

impl PaddleVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleVariant::Rectangle => "rectangle",
            PaddleVariant::Circle => "circle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rectangle" | "rect" => Some(PaddleVariant::Rectangle),
            "circle" | "round" => Some(PaddleVariant::Circle),
            _ => None,
        }
    }

    pub fn shape(&self) -> PaddleShape {
        match self {
            PaddleVariant::Rectangle => PaddleShape::rectangle(),
            PaddleVariant::Circle => PaddleShape::circle(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: PaddleVariant,
    /// Initial speed multiplier
    pub speed_factor: f32,
    /// RNG seed; random when absent
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: PaddleVariant::Rectangle,
            speed_factor: 1.0,
            seed: None,
            master_volume: 0.8,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, clamping out-of-range values
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path`, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        self.speed_factor = if self.speed_factor.is_finite() {
            self.speed_factor.clamp(MIN_SPEED_FACTOR, MAX_SPEED_FACTOR)
        } else {
            1.0
        };
        self.master_volume = if self.master_volume.is_finite() {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    /// Seed to use for this session
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
