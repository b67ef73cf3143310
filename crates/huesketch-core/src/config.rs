//! Picker and drawing configuration.

use crate::color::{parse_hex, ColorError, ColorModel, Rgb};
use crate::recent::DEFAULT_RECENT_CAPACITY;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Starting color of a fresh session (`#3b82f6`).
pub const DEFAULT_INITIAL_RGB: Rgb = Rgb::new(0x3b, 0x82, 0xf6);
/// Default freehand stroke width in pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 3.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Recent color capacity must be at least 1")]
    InvalidCapacity,
    #[error("Stroke width must be positive, got {0}")]
    InvalidStrokeWidth(f64),
    #[error("Invalid initial color: {0}")]
    InvalidInitialColor(#[from] ColorError),
}

/// Session and surface settings. Every field has a default, so partial
/// JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// HSB or HSL, fixed for the session.
    pub model: ColorModel,
    /// How many recent colors to keep.
    pub recent_capacity: usize,
    /// Hex color the session starts on.
    pub initial_color: String,
    /// Freehand stroke width.
    pub stroke_width: f64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            model: ColorModel::default(),
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            initial_color: DEFAULT_INITIAL_RGB.to_hex(),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl PickerConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded picker config: {:?} model, {} recent colors",
            config.model,
            config.recent_capacity
        );
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recent_capacity == 0 {
            return Err(ConfigError::InvalidCapacity);
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(ConfigError::InvalidStrokeWidth(self.stroke_width));
        }
        parse_hex(&self.initial_color)?;
        Ok(())
    }
}
