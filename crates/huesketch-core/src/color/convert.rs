//! Pure color space conversions.
//!
//! Hue is in degrees and wraps modulo 360. Saturation, brightness and
//! lightness are percentages (0-100) at this boundary and only become
//! 0.0-1.0 fractions inside the math. Every function is total: callers
//! pass pre-clamped values, anything larger is clamped here.

use serde::{Deserialize, Serialize};

/// An opaque 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }
}

fn wrap_hue(hue: u16) -> f64 {
    f64::from(hue % 360)
}

fn fraction(percent: u8) -> f64 {
    f64::from(percent.min(100)) / 100.0
}

fn channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

fn percent(value: f64) -> u8 {
    (value * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Six-sector chroma placement shared by HSB and HSL.
fn from_chroma(hue: u16, chroma: f64, offset: f64) -> Rgb {
    let h = wrap_hue(hue) / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());

    let (r, g, b) = match h as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Rgb::new(channel(r + offset), channel(g + offset), channel(b + offset))
}

/// HSB (HSV) to RGB.
pub fn hsb_to_rgb(hue: u16, saturation: u8, brightness: u8) -> Rgb {
    let s = fraction(saturation);
    let v = fraction(brightness);
    let chroma = v * s;
    from_chroma(hue, chroma, v - chroma)
}

/// HSL to RGB.
pub fn hsl_to_rgb(hue: u16, saturation: u8, lightness: u8) -> Rgb {
    let s = fraction(saturation);
    let l = fraction(lightness);
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    from_chroma(hue, chroma, l - chroma / 2.0)
}

/// Zero-padded lowercase `#rrggbb`, no alpha.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Hue in whole degrees, 0 for achromatic input.
fn hue_of(rgb: Rgb) -> u16 {
    let max = rgb.r.max(rgb.g).max(rgb.b);
    let min = rgb.r.min(rgb.g).min(rgb.b);
    if max == min {
        return 0;
    }

    let r = f64::from(rgb.r);
    let g = f64::from(rgb.g);
    let b = f64::from(rgb.b);
    let delta = f64::from(max - min);

    let sector = if max == rgb.r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == rgb.g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    ((sector * 60.0).round() as u16) % 360
}

/// RGB to HSB, each component rounded to the nearest integer.
pub fn rgb_to_hsb(rgb: Rgb) -> (u16, u8, u8) {
    let max = rgb.r.max(rgb.g).max(rgb.b);
    let min = rgb.r.min(rgb.g).min(rgb.b);

    let value = f64::from(max) / 255.0;
    let saturation = if max == 0 {
        0.0
    } else {
        f64::from(max - min) / f64::from(max)
    };

    (hue_of(rgb), percent(saturation), percent(value))
}

/// RGB to HSL, each component rounded to the nearest integer.
pub fn rgb_to_hsl(rgb: Rgb) -> (u16, u8, u8) {
    let max = rgb.r.max(rgb.g).max(rgb.b);
    let min = rgb.r.min(rgb.g).min(rgb.b);

    let hi = f64::from(max) / 255.0;
    let lo = f64::from(min) / 255.0;
    let lightness = (hi + lo) / 2.0;

    let saturation = if max == min {
        0.0
    } else {
        (hi - lo) / (1.0 - (2.0 * lightness - 1.0).abs())
    };

    (hue_of(rgb), percent(saturation), percent(lightness))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hue_distance(a: u16, b: u16) -> u16 {
        let d = (i32::from(a % 360) - i32::from(b % 360)).unsigned_abs() as u16;
        d.min(360 - d)
    }

    fn close(a: u8, b: u8) -> bool {
        a.abs_diff(b) <= 1
    }

    #[test]
    fn test_hsb_primaries() {
        assert_eq!(hsb_to_rgb(0, 100, 100), Rgb::new(255, 0, 0));
        assert_eq!(hsb_to_rgb(120, 100, 100), Rgb::new(0, 255, 0));
        assert_eq!(hsb_to_rgb(240, 100, 100), Rgb::new(0, 0, 255));
        assert_eq!(hsb_to_rgb(360, 100, 100), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_hsb_achromatic() {
        assert_eq!(hsb_to_rgb(200, 0, 100), Rgb::WHITE);
        assert_eq!(hsb_to_rgb(200, 100, 0), Rgb::BLACK);
        assert_eq!(hsb_to_rgb(17, 0, 50), Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0, 100, 50), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(120, 100, 50), Rgb::new(0, 255, 0));
        assert_eq!(hsl_to_rgb(240, 100, 50), Rgb::new(0, 0, 255));
        assert_eq!(hsl_to_rgb(0, 100, 100), Rgb::WHITE);
        assert_eq!(hsl_to_rgb(0, 100, 0), Rgb::BLACK);
    }

    #[test]
    fn test_hex() {
        assert_eq!(rgb_to_hex(Rgb::WHITE), "#ffffff");
        assert_eq!(rgb_to_hex(Rgb::BLACK), "#000000");
        assert_eq!(rgb_to_hex(Rgb::new(59, 130, 246)), "#3b82f6");
        assert_eq!(Rgb::new(1, 2, 3).to_hex(), "#010203");
    }

    #[test]
    fn test_inverse_achromatic() {
        assert_eq!(rgb_to_hsb(Rgb::BLACK), (0, 0, 0));
        assert_eq!(rgb_to_hsb(Rgb::WHITE), (0, 0, 100));
        assert_eq!(rgb_to_hsl(Rgb::WHITE), (0, 0, 100));
        assert_eq!(rgb_to_hsl(Rgb::new(128, 128, 128)), (0, 0, 50));
    }

    #[test]
    fn test_inverse_known_values() {
        assert_eq!(rgb_to_hsb(Rgb::new(255, 0, 0)), (0, 100, 100));
        assert_eq!(rgb_to_hsb(Rgb::new(0, 0, 255)), (240, 100, 100));
        assert_eq!(rgb_to_hsl(Rgb::new(0, 255, 0)), (120, 100, 50));
        // Just below red wraps to the top of the circle rather than going negative.
        assert_eq!(rgb_to_hsb(Rgb::new(255, 0, 4)).0, 359);
    }

    proptest! {
        #[test]
        fn prop_hsb_round_trip(h in 0u16..=360, s in 60u8..=100, b in 60u8..=100) {
            let (h2, s2, b2) = rgb_to_hsb(hsb_to_rgb(h, s, b));
            prop_assert!(hue_distance(h, h2) <= 1, "hue {} -> {}", h, h2);
            prop_assert!(close(s, s2), "saturation {} -> {}", s, s2);
            prop_assert!(close(b, b2), "brightness {} -> {}", b, b2);
        }

        #[test]
        fn prop_hsl_round_trip(h in 0u16..=360, s in 60u8..=100, l in 30u8..=70) {
            let (h2, s2, l2) = rgb_to_hsl(hsl_to_rgb(h, s, l));
            prop_assert!(hue_distance(h, h2) <= 1, "hue {} -> {}", h, h2);
            prop_assert!(close(s, s2), "saturation {} -> {}", s, s2);
            prop_assert!(close(l, l2), "lightness {} -> {}", l, l2);
        }

        #[test]
        fn prop_brightness_survives_any_hue(h in 0u16..=360, s in 0u8..=100, b in 0u8..=100) {
            let (_, _, b2) = rgb_to_hsb(hsb_to_rgb(h, s, b));
            prop_assert_eq!(b, b2);
        }

        #[test]
        fn prop_gray_has_no_hue(v in 0u8..=255) {
            let (h, s, _) = rgb_to_hsb(Rgb::new(v, v, v));
            prop_assert_eq!((h, s), (0, 0));
            let (h, s, _) = rgb_to_hsl(Rgb::new(v, v, v));
            prop_assert_eq!((h, s), (0, 0));
        }
    }
}
