//! Color model, derived color strings and color string parsing.

mod convert;

pub use convert::{hsb_to_rgb, hsl_to_rgb, rgb_to_hex, rgb_to_hsb, rgb_to_hsl, Rgb};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest hue value (degrees). 360 and 0 name the same hue.
pub const MAX_HUE: u16 = 360;
/// Largest saturation / brightness / lightness / alpha value.
pub const MAX_PERCENT: u8 = 100;

/// Errors raised while decoding color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
    #[error("Invalid rgba color: {0}")]
    InvalidRgba(String),
    #[error("Unsupported color string: {0}")]
    Unsupported(String),
}

/// Which cylindrical model the third color axis belongs to.
///
/// Chosen once when a session is built; every conversion dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorModel {
    /// Hue, saturation, brightness (HSV).
    #[default]
    Hsb,
    /// Hue, saturation, lightness.
    Hsl,
}

impl ColorModel {
    /// Convert hue / saturation / level to RGB under this model.
    pub fn to_rgb(self, hue: u16, saturation: u8, level: u8) -> Rgb {
        match self {
            ColorModel::Hsb => hsb_to_rgb(hue, saturation, level),
            ColorModel::Hsl => hsl_to_rgb(hue, saturation, level),
        }
    }

    /// Decode RGB into hue / saturation / level under this model.
    pub fn from_rgb(self, rgb: Rgb) -> (u16, u8, u8) {
        match self {
            ColorModel::Hsb => rgb_to_hsb(rgb),
            ColorModel::Hsl => rgb_to_hsl(rgb),
        }
    }

    /// Display name of the third axis.
    pub fn level_name(self) -> &'static str {
        match self {
            ColorModel::Hsb => "brightness",
            ColorModel::Hsl => "lightness",
        }
    }
}

/// Canonical picker color.
///
/// `level` is brightness for [`ColorModel::Hsb`] sessions and lightness for
/// [`ColorModel::Hsl`] sessions. All fields stay inside their closed
/// integer ranges; every constructor and setter clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    hue: u16,
    saturation: u8,
    level: u8,
    alpha: u8,
}

fn clamp_percent(value: i32) -> u8 {
    value.clamp(0, i32::from(MAX_PERCENT)) as u8
}

fn clamp_hue(value: i32) -> u16 {
    value.clamp(0, i32::from(MAX_HUE)) as u16
}

impl Color {
    /// Create a color, clamping each component into range.
    pub fn new(hue: i32, saturation: i32, level: i32, alpha: i32) -> Self {
        Self {
            hue: clamp_hue(hue),
            saturation: clamp_percent(saturation),
            level: clamp_percent(level),
            alpha: clamp_percent(alpha),
        }
    }

    /// Opaque color.
    pub fn opaque(hue: i32, saturation: i32, level: i32) -> Self {
        Self::new(hue, saturation, level, i32::from(MAX_PERCENT))
    }

    /// Decode an RGB triple into an opaque color under `model`.
    pub fn from_rgb(model: ColorModel, rgb: Rgb) -> Self {
        let (hue, saturation, level) = model.from_rgb(rgb);
        Self::opaque(i32::from(hue), i32::from(saturation), i32::from(level))
    }

    pub fn hue(&self) -> u16 {
        self.hue
    }

    pub fn saturation(&self) -> u8 {
        self.saturation
    }

    /// Brightness or lightness, depending on the session model.
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn set_hue(&mut self, hue: i32) {
        self.hue = clamp_hue(hue);
    }

    pub fn set_saturation(&mut self, saturation: i32) {
        self.saturation = clamp_percent(saturation);
    }

    pub fn set_level(&mut self, level: i32) {
        self.level = clamp_percent(level);
    }

    pub fn set_alpha(&mut self, alpha: i32) {
        self.alpha = clamp_percent(alpha);
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha == MAX_PERCENT
    }

    /// RGB under `model`, ignoring alpha.
    pub fn to_rgb(&self, model: ColorModel) -> Rgb {
        model.to_rgb(self.hue, self.saturation, self.level)
    }
}

impl Default for Color {
    /// Opaque black.
    fn default() -> Self {
        Self::opaque(0, 0, 0)
    }
}

/// Alpha percentage rendered as a CSS fraction with at most two decimals.
fn format_alpha(alpha: u8) -> String {
    let alpha = alpha.min(MAX_PERCENT);
    let whole = alpha / 100;
    let frac = alpha % 100;
    if frac == 0 {
        format!("{whole}")
    } else if frac % 10 == 0 {
        format!("{whole}.{}", frac / 10)
    } else {
        format!("{whole}.{frac:02}")
    }
}

/// The published color string for `color`.
///
/// `#rrggbb` when fully opaque, `rgba(r, g, b, a)` otherwise. Always
/// derived from the four color fields, never cached.
pub fn derive_color_string(model: ColorModel, color: &Color) -> String {
    let rgb = color.to_rgb(model);
    if color.is_opaque() {
        rgb.to_hex()
    } else {
        format!(
            "rgba({}, {}, {}, {})",
            rgb.r,
            rgb.g,
            rgb.b,
            format_alpha(color.alpha())
        )
    }
}

/// Parse `#rrggbb` or `#rgb` (either case).
pub fn parse_hex(input: &str) -> Result<Rgb, ColorError> {
    let invalid = || ColorError::InvalidHex(input.to_string());
    let digits = input.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let component = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match digits.len() {
        6 => Ok(Rgb::new(
            component(&digits[0..2])?,
            component(&digits[2..4])?,
            component(&digits[4..6])?,
        )),
        3 => {
            let short = |i: usize| component(&digits[i..=i]).map(|v| v * 17);
            Ok(Rgb::new(short(0)?, short(1)?, short(2)?))
        }
        _ => Err(invalid()),
    }
}

/// A parsed color string: RGB plus alpha as a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: u8,
}

impl Rgba {
    /// RGBA with alpha scaled to 0-255.
    pub fn to_rgba8(self) -> [u8; 4] {
        let a = (f64::from(self.alpha) * 255.0 / 100.0).round() as u8;
        [self.rgb.r, self.rgb.g, self.rgb.b, a]
    }
}

fn parse_functional(input: &str, body: &str, with_alpha: bool) -> Result<Rgba, ColorError> {
    let invalid = || ColorError::InvalidRgba(input.to_string());
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return Err(invalid());
    }

    let channel = |s: &str| s.parse::<u8>().map_err(|_| invalid());
    let rgb = Rgb::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);

    let alpha = if with_alpha {
        let a: f64 = parts[3].parse().map_err(|_| invalid())?;
        if !(0.0..=1.0).contains(&a) {
            return Err(invalid());
        }
        (a * 100.0).round() as u8
    } else {
        MAX_PERCENT
    };

    Ok(Rgba { rgb, alpha })
}

/// Parse any string the picker publishes (`#rrggbb`, `#rgb`,
/// `rgba(r, g, b, a)`) plus plain `rgb(r, g, b)`.
pub fn parse_color_string(input: &str) -> Result<Rgba, ColorError> {
    let trimmed = input.trim();
    if trimmed.starts_with('#') {
        return parse_hex(trimmed).map(|rgb| Rgba {
            rgb,
            alpha: MAX_PERCENT,
        });
    }

    let lower = trimmed.to_ascii_lowercase();
    if let Some(body) = lower.strip_prefix("rgba(").and_then(|s| s.strip_suffix(')')) {
        parse_functional(input, body, true)
    } else if let Some(body) = lower.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        parse_functional(input, body, false)
    } else {
        Err(ColorError::Unsupported(input.to_string()))
    }
}
