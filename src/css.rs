//! Standalone CSS color parsing.
//!
//! Turns CSS color syntax into 8-bit RGB without a browser. Supported forms:
//! - `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` (alpha is parsed and dropped)
//! - named colors (`red`, `rebeccapurple`, ...)
//! - `rgb()` / `rgba()` with numbers or percentages
//! - `hsl()` / `hsla()`
//!
//! Both the legacy comma syntax and the space syntax (`rgb(255 0 0 / 50%)`)
//! are accepted. Anything else is `None`.

use crate::color::hsl_to_rgb;
use crate::named;

/// RGB color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Serialize the way a browser reports a computed `color` value.
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Parse any supported CSS color string.
pub fn parse_css_color(s: &str) -> Option<Rgb> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_digits(hex);
    }

    let lower = s.to_ascii_lowercase();
    if lower.starts_with("rgb") {
        parse_rgb_function(&lower)
    } else if lower.starts_with("hsl") {
        parse_hsl_function(&lower)
    } else {
        named::lookup(&lower)
    }
}

/// Hex digits without the leading `#`: 3, 4, 6 or 8 of them.
fn parse_hex_digits(hex: &str) -> Option<Rgb> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let nibble = |i: usize| -> Option<u8> {
        let v = u8::from_str_radix(hex.get(i..=i)?, 16).ok()?;
        Some(v * 17)
    };
    let byte = |i: usize| -> Option<u8> { u8::from_str_radix(hex.get(i..i + 2)?, 16).ok() };

    match hex.len() {
        // #rgb / #rgba
        3 | 4 => Some(Rgb::new(nibble(0)?, nibble(1)?, nibble(2)?)),
        // #rrggbb / #rrggbbaa
        6 | 8 => Some(Rgb::new(byte(0)?, byte(2)?, byte(4)?)),
        _ => None,
    }
}

/// Split the argument list of a CSS color function.
///
/// Returns the channel arguments and whether an alpha argument was present.
fn function_args<'a>(s: &'a str, names: &[&str]) -> Option<(Vec<&'a str>, Option<&'a str>)> {
    let open = s.find('(')?;
    let name = s.get(..open)?.trim();
    if !names.contains(&name) {
        return None;
    }
    let inner = s.get(open + 1..)?.strip_suffix(')')?.trim();

    if inner.contains(',') {
        let mut parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let alpha = match parts.len() {
            3 => None,
            4 => parts.pop(),
            _ => return None,
        };
        return Some((parts, alpha));
    }

    // Space syntax, alpha after a slash
    let (channels, alpha) = match inner.split_once('/') {
        Some((c, a)) => (c, Some(a.trim())),
        None => (inner, None),
    };
    let parts: Vec<&str> = channels.split_whitespace().collect();
    if parts.len() != 3 {
        return None;
    }
    Some((parts, alpha))
}

fn parse_rgb_function(s: &str) -> Option<Rgb> {
    let (parts, alpha) = function_args(s, &["rgb", "rgba"])?;
    if let Some(a) = alpha {
        parse_alpha(a)?;
    }
    let [r, g, b] = parts.as_slice() else {
        return None;
    };
    Some(Rgb::new(
        parse_rgb_channel(r)?,
        parse_rgb_channel(g)?,
        parse_rgb_channel(b)?,
    ))
}

fn parse_hsl_function(s: &str) -> Option<Rgb> {
    let (parts, alpha) = function_args(s, &["hsl", "hsla"])?;
    if let Some(a) = alpha {
        parse_alpha(a)?;
    }
    let [h, sat, light] = parts.as_slice() else {
        return None;
    };

    let hue = parse_hue(h)?;
    let sat = parse_percentage(sat)?.clamp(0.0, 100.0) / 100.0;
    let light = parse_percentage(light)?.clamp(0.0, 100.0) / 100.0;

    let (r, g, b) = hsl_to_rgb(hue.rem_euclid(360.0) / 360.0, sat, light);
    Some(Rgb::new(r, g, b))
}

/// A channel is 0-255 or a percentage; out-of-range values clamp.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_rgb_channel(s: &str) -> Option<u8> {
    let value = if let Some(percent) = s.strip_suffix('%') {
        parse_number(percent)? / 100.0 * 255.0
    } else {
        parse_number(s)?
    };
    Some(value.round().clamp(0.0, 255.0) as u8)
}

fn parse_hue(s: &str) -> Option<f64> {
    parse_number(s.strip_suffix("deg").unwrap_or(s))
}

/// Percentages are required by the legacy syntax; bare numbers are
/// accepted the way CSS Color 4 allows them.
fn parse_percentage(s: &str) -> Option<f64> {
    parse_number(s.strip_suffix('%').unwrap_or(s))
}

fn parse_alpha(s: &str) -> Option<f64> {
    match s.strip_suffix('%') {
        Some(percent) => parse_number(percent).map(|p| p / 100.0),
        None => parse_number(s),
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let v: f64 = s.trim().parse().ok()?;
    v.is_finite().then_some(v)
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
    fn test_parse_hex_6() {
        assert_eq!(parse_css_color("#FF8040"), Some(Rgb::new(255, 128, 64)));
    }

    #[test]
    fn test_parse_hex_3_expands() {
        assert_eq!(parse_css_color("#f80"), Some(Rgb::new(255, 136, 0)));
    }

    #[test]
    fn test_parse_hex_8_ignores_alpha() {
        assert_eq!(parse_css_color("#11223380"), Some(Rgb::new(17, 34, 51)));
        assert_eq!(parse_css_color("#1238"), Some(Rgb::new(17, 34, 51)));
    }

    #[test]
    fn test_parse_hex_bad_length() {
        assert_eq!(parse_css_color("#12345"), None);
        assert_eq!(parse_css_color("#"), None);
    }

    #[test]
    fn test_parse_hex_non_hex_digits() {
        assert_eq!(parse_css_color("#gggggg"), None);
        assert_eq!(parse_css_color("#black"), None);
    }

    #[test]
    fn test_parse_rgb() {
        assert_eq!(
            parse_css_color("rgb(255, 128, 64)"),
            Some(Rgb::new(255, 128, 64))
        );
        assert_eq!(parse_css_color("rgb(0,0,0)"), Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn test_parse_rgba_drops_alpha() {
        assert_eq!(
            parse_css_color("rgba(255, 128, 64, 0.5)"),
            Some(Rgb::new(255, 128, 64))
        );
    }

    #[test]
    fn test_parse_rgb_space_syntax() {
        assert_eq!(
            parse_css_color("rgb(10 20 30 / 50%)"),
            Some(Rgb::new(10, 20, 30))
        );
    }

    #[test]
    fn test_parse_rgb_percentages_and_clamping() {
        assert_eq!(
            parse_css_color("rgb(100%, 50%, 0%)"),
            Some(Rgb::new(255, 128, 0))
        );
        assert_eq!(
            parse_css_color("rgb(300, -5, 12.4)"),
            Some(Rgb::new(255, 0, 12))
        );
    }

    #[test]
    fn test_parse_rgb_wrong_arity() {
        assert_eq!(parse_css_color("rgb(1, 2)"), None);
        assert_eq!(parse_css_color("rgb(1, 2, 3, 4, 5)"), None);
        assert_eq!(parse_css_color("rgb(1, 2, 3"), None);
        assert_eq!(parse_css_color("rgbx(1, 2, 3)"), None);
    }

    #[test]
    fn test_parse_hsl() {
        assert_eq!(
            parse_css_color("hsl(0, 100%, 50%)"),
            Some(Rgb::new(255, 0, 0))
        );
        assert_eq!(
            parse_css_color("hsla(120deg, 100%, 50%, 0.3)"),
            Some(Rgb::new(0, 255, 0))
        );
        assert_eq!(
            parse_css_color("hsl(600 100% 50%)"),
            Some(Rgb::new(0, 0, 255))
        );
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(parse_css_color("Black"), Some(Rgb::new(0, 0, 0)));
        assert_eq!(parse_css_color("tomato"), Some(Rgb::new(255, 99, 71)));
        assert_eq!(parse_css_color("not-a-color"), None);
    }

    #[test]
    fn test_to_css_matches_computed_style_format() {
        assert_eq!(Rgb::new(1, 22, 255).to_css(), "rgb(1, 22, 255)");
    }
}
