//! Color math for accent resolution
//!
//! Normalization of user-entered color strings, the `HslTriple` output unit,
//! and RGB <-> HSL conversion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Accent used whenever a color is unset or cannot be resolved.
pub const DEFAULT_HSL: HslTriple = HslTriple::new(250, 100, 50);

/// Hue in whole degrees, saturation and lightness in whole percent.
///
/// Serializes as `{"h": .., "s": .., "l": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HslTriple {
    #[serde(rename = "h")]
    pub hue: u16,
    #[serde(rename = "s")]
    pub saturation: u8,
    #[serde(rename = "l")]
    pub lightness: u8,
}

impl HslTriple {
    pub const fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Convert 8-bit RGB channels and round to whole degrees/percent.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let (h, s, l) = rgb_to_hsl(r, g, b);
        Self {
            hue: (h * 360.0).round().clamp(0.0, 360.0) as u16,
            saturation: (s * 100.0).round().clamp(0.0, 100.0) as u8,
            lightness: (l * 100.0).round().clamp(0.0, 100.0) as u8,
        }
    }

    pub const fn as_tuple(self) -> (u16, u8, u8) {
        (self.hue, self.saturation, self.lightness)
    }
}

impl Default for HslTriple {
    fn default() -> Self {
        DEFAULT_HSL
    }
}

impl fmt::Display for HslTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Give a color string a leading `#`.
///
/// Empty and whitespace-only input means "unset" and normalizes to `""`.
/// Anything else is returned as-is if it already starts with `#`, otherwise
/// with `#` prepended. The string is not validated here.
pub fn normalize_color(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    if raw.starts_with('#') {
        raw.to_string()
    } else {
        format!("#{raw}")
    }
}

/// Convert RGB to HSL, all components in `[0, 1]`
#[allow(clippy::many_single_char_names)]
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = f64::midpoint(max, min);

    // Achromatic: any gray, including black and white
    if (max - min).abs() < f64::EPSILON {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if (max - r).abs() < f64::EPSILON {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if (max - g).abs() < f64::EPSILON {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0, s, l)
}

/// Convert HSL (all components in `[0, 1]`) to 8-bit RGB
#[allow(clippy::many_single_char_names)]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    if s.abs() < f64::EPSILON {
        let v = (l * 255.0).round().clamp(0.0, 255.0) as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l.mul_add(-s, l + s)
    };
    let p = 2.0f64.mul_add(l, -q);

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    (
        (r * 255.0).round().clamp(0.0, 255.0) as u8,
        (g * 255.0).round().clamp(0.0, 255.0) as u8,
        (b * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        return ((q - p) * 6.0).mul_add(t, p);
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return ((q - p) * (2.0 / 3.0 - t)).mul_add(6.0, p);
    }
    p
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_hash() {
        assert_eq!(normalize_color("379D94"), "#379D94");
    }

    #[test]
    fn test_normalize_keeps_existing_hash() {
        assert_eq!(normalize_color("#379D94"), "#379D94");
    }

    #[test]
    fn test_normalize_blank_is_unset() {
        assert_eq!(normalize_color(""), "");
        assert_eq!(normalize_color("   "), "");
        assert_eq!(normalize_color("\t\n"), "");
    }

    #[test]
    fn test_normalize_does_not_validate() {
        // Named colors get the prefix too; the engine deals with it
        assert_eq!(normalize_color("black"), "#black");
    }

    #[test]
    fn test_primaries() {
        assert_eq!(HslTriple::from_rgb(255, 0, 0).as_tuple(), (0, 100, 50));
        assert_eq!(HslTriple::from_rgb(0, 255, 0).as_tuple(), (120, 100, 50));
        assert_eq!(HslTriple::from_rgb(0, 0, 255).as_tuple(), (240, 100, 50));
    }

    #[test]
    fn test_gray_is_achromatic() {
        let gray = HslTriple::from_rgb(128, 128, 128);
        assert_eq!(gray.hue, 0);
        assert_eq!(gray.saturation, 0);
        assert_eq!(gray.lightness, 50);
    }

    #[test]
    fn test_black_and_white() {
        assert_eq!(HslTriple::from_rgb(0, 0, 0).as_tuple(), (0, 0, 0));
        assert_eq!(HslTriple::from_rgb(255, 255, 255).as_tuple(), (0, 0, 100));
    }

    #[test]
    fn test_default_plugin_color() {
        // #379D94, the default source-mode accent
        assert_eq!(HslTriple::from_rgb(0x37, 0x9D, 0x94).as_tuple(), (175, 48, 42));
    }

    #[test]
    fn test_hue_wraps_when_blue_exceeds_green() {
        // Magenta-ish red: max is r and g < b, so the +6 branch applies
        let c = HslTriple::from_rgb(255, 0, 128);
        assert_eq!(c.hue, 330);
    }

    #[test]
    fn test_light_colors_use_upper_saturation_branch() {
        // l > 0.5 takes d / (2 - max - min)
        let c = HslTriple::from_rgb(255, 128, 128);
        assert_eq!(c.as_tuple(), (0, 100, 75));
    }

    #[test]
    fn test_hsl_to_rgb_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), (0, 255, 0));
        assert_eq!(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), (0, 0, 255));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.5), (128, 128, 128));
    }

    #[test]
    fn test_display() {
        assert_eq!(DEFAULT_HSL.to_string(), "hsl(250, 100%, 50%)");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&DEFAULT_HSL).unwrap();
        assert_eq!(json, r#"{"h":250,"s":100,"l":50}"#);
    }
}
