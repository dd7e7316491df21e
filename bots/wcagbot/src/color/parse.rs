// SPDX-License-Identifier: PMPL-1.0-or-later
//! CSS color parsing.
//!
//! [`parse_color`] reads a small subset of CSS Color: `#rrggbb`,
//! `rgb()`/`rgba()` and `hsl()`/`hsla()`, alpha ignored. Everything else
//! (named colors, `lab()`, `currentColor`, gradients) is `None`.
//!
//! [`normalize_css_color`] turns authored values into the form a browser
//! reports for computed styles (`rgb(r, g, b)` / `rgba(r, g, b, a)`), which is
//! what the document snapshot hands to the rules.

use super::{rgb_to_hex, Rgb};
use regex::Regex;
use std::sync::LazyLock;

static RGB_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rgba?\(\s*(\d+)\s*[,\s]\s*(\d+)\s*[,\s]\s*(\d+)").expect("valid regex")
});

static HSL_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)hsla?\(\s*(\d+)(?:deg)?\s*[,\s]\s*(\d+)%\s*[,\s]\s*(\d+)%").expect("valid regex")
});

static FN_ARGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:rgb|hsl)a?\((.*)\)$").expect("valid regex")
});

/// Named colors understood when normalizing authored CSS
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0, 0, 0)),
    ("white", Rgb::new(255, 255, 255)),
    ("red", Rgb::new(255, 0, 0)),
    ("green", Rgb::new(0, 128, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("gray", Rgb::new(128, 128, 128)),
    ("grey", Rgb::new(128, 128, 128)),
    ("silver", Rgb::new(192, 192, 192)),
    ("maroon", Rgb::new(128, 0, 0)),
    ("olive", Rgb::new(128, 128, 0)),
    ("lime", Rgb::new(0, 255, 0)),
    ("aqua", Rgb::new(0, 255, 255)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("teal", Rgb::new(0, 128, 128)),
    ("navy", Rgb::new(0, 0, 128)),
    ("fuchsia", Rgb::new(255, 0, 255)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("purple", Rgb::new(128, 0, 128)),
    ("orange", Rgb::new(255, 165, 0)),
    ("darkgray", Rgb::new(169, 169, 169)),
    ("darkgrey", Rgb::new(169, 169, 169)),
    ("lightgray", Rgb::new(211, 211, 211)),
    ("lightgrey", Rgb::new(211, 211, 211)),
    ("dimgray", Rgb::new(105, 105, 105)),
    ("gainsboro", Rgb::new(220, 220, 220)),
    ("whitesmoke", Rgb::new(245, 245, 245)),
    ("crimson", Rgb::new(220, 20, 60)),
    ("gold", Rgb::new(255, 215, 0)),
    ("indigo", Rgb::new(75, 0, 130)),
    ("darkblue", Rgb::new(0, 0, 139)),
    ("darkred", Rgb::new(139, 0, 0)),
];

/// Parse a CSS color value into `#rrggbb` form.
///
/// A `#` value must be exactly `#rrggbb` and is returned as written.
pub fn parse_color(value: &str) -> Option<String> {
    let value = value.trim();

    if value.starts_with('#') {
        let digits = &value[1..];
        return (digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit()))
            .then(|| value.to_string());
    }

    if let Some(caps) = RGB_FN.captures(value) {
        let channel = |i: usize| caps[i].parse::<u32>().ok().map(|c| f64::from(c.min(255)));
        return Some(rgb_to_hex(channel(1)?, channel(2)?, channel(3)?));
    }

    if let Some(caps) = HSL_FN.captures(value) {
        let component = |i: usize| caps[i].parse::<u32>().ok();
        let h = f64::from(component(1)? % 360) / 360.0;
        let s = f64::from(component(2)?.min(100)) / 100.0;
        let l = f64::from(component(3)?.min(100)) / 100.0;
        return Some(hsl_to_rgb(h, s, l).to_hex());
    }

    None
}

/// Standard HSL to RGB conversion, all inputs in `[0, 1]`
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let to_byte = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;

    if s == 0.0 {
        let v = to_byte(l);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        to_byte(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_byte(hue_to_rgb(p, q, h)),
        to_byte(hue_to_rgb(p, q, h - 1.0 / 3.0)),
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
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Whether a computed background value paints nothing (`transparent` or alpha 0)
pub fn is_transparent(value: &str) -> bool {
    let value = value.trim();
    if value.eq_ignore_ascii_case("transparent") {
        return true;
    }

    let Some(caps) = FN_ARGS.captures(value) else {
        return false;
    };
    let args: Vec<&str> = caps[1]
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|a| !a.is_empty())
        .collect();

    match args.get(3) {
        Some(alpha) => alpha
            .trim_end_matches('%')
            .parse::<f64>()
            .map(|a| a == 0.0)
            .unwrap_or(false),
        None => false,
    }
}

/// Look up a named CSS color
pub fn named_color(name: &str) -> Option<Rgb> {
    NAMED_COLORS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, rgb)| *rgb)
}

/// Serialize an authored color the way a browser reports computed colors.
///
/// Hex (3, 4, 6 and 8 digits), named colors and `transparent` become
/// `rgb()`/`rgba()`; functional notations and anything unrecognized are
/// returned trimmed and lower-cased.
pub fn normalize_css_color(value: &str) -> String {
    let value = value.trim().to_ascii_lowercase();

    if value == "transparent" {
        return "rgba(0, 0, 0, 0)".to_string();
    }

    if let Some(digits) = value.strip_prefix('#') {
        if let Some((rgb, alpha)) = expand_hex(digits) {
            return serialize_rgba(rgb, alpha);
        }
        return value;
    }

    match named_color(&value) {
        Some(rgb) => serialize_rgba(rgb, 255),
        None => value,
    }
}

fn expand_hex(digits: &str) -> Option<(Rgb, u8)> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

    match digits.len() {
        3 => Some((Rgb::new(nibble(0)?, nibble(1)?, nibble(2)?), 255)),
        4 => Some((Rgb::new(nibble(0)?, nibble(1)?, nibble(2)?), nibble(3)?)),
        6 => Some((Rgb::new(byte(0)?, byte(2)?, byte(4)?), 255)),
        8 => Some((Rgb::new(byte(0)?, byte(2)?, byte(4)?), byte(6)?)),
        _ => None,
    }
}

fn serialize_rgba(rgb: Rgb, alpha: u8) -> String {
    if alpha == 255 {
        format!("rgb({}, {}, {})", rgb.r, rgb.g, rgb.b)
    } else {
        let a = (f64::from(alpha) / 255.0 * 1000.0).round() / 1000.0;
        format!("rgba({}, {}, {}, {})", rgb.r, rgb.g, rgb.b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_color("#ff0000").as_deref(), Some("#ff0000"));
        assert_eq!(parse_color("  #AbCdEf ").as_deref(), Some("#AbCdEf"));
        assert_eq!(parse_color("#fff"), None);
        assert_eq!(parse_color("#ff000080"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_color("rgb(255, 0, 0)").as_deref(), Some("#ff0000"));
        assert_eq!(parse_color("rgba(0, 128, 0, 0.5)").as_deref(), Some("#008000"));
        assert_eq!(parse_color("rgb(10 20 30)").as_deref(), Some("#0a141e"));
        assert_eq!(parse_color("rgb(300, 0, 0)").as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_parse_hsl() {
        assert_eq!(parse_color("hsl(0, 100%, 50%)").as_deref(), Some("#ff0000"));
        assert_eq!(parse_color("hsl(120, 100%, 25%)").as_deref(), Some("#008000"));
        assert_eq!(parse_color("hsla(240, 100%, 50%, 0.3)").as_deref(), Some("#0000ff"));
        assert_eq!(parse_color("hsl(0, 0%, 100%)").as_deref(), Some("#ffffff"));
    }

    #[test]
    fn test_parse_rejects_other_syntax() {
        assert_eq!(parse_color("papayawhip"), None);
        assert_eq!(parse_color("currentColor"), None);
        assert_eq!(parse_color("lab(50% 40 59)"), None);
        assert_eq!(parse_color("linear-gradient(red, blue)"), None);
        assert_eq!(parse_color(""), None);
    }

    #[test]
    fn test_is_transparent() {
        assert!(is_transparent("transparent"));
        assert!(is_transparent("rgba(0, 0, 0, 0)"));
        assert!(is_transparent("rgb(12 34 56 / 0%)"));
        assert!(is_transparent("hsla(0, 0%, 0%, 0.0)"));
        assert!(!is_transparent("rgba(0, 0, 0, 0.5)"));
        assert!(!is_transparent("rgb(0, 0, 0)"));
        assert!(!is_transparent("#00000000"));
    }

    #[test]
    fn test_normalize_hex_forms() {
        assert_eq!(normalize_css_color("#FFF"), "rgb(255, 255, 255)");
        assert_eq!(normalize_css_color("#1e293b"), "rgb(30, 41, 59)");
        assert_eq!(normalize_css_color("#00000000"), "rgba(0, 0, 0, 0)");
        assert_eq!(normalize_css_color("#0008"), "rgba(0, 0, 0, 0.533)");
    }

    #[test]
    fn test_normalize_named_and_passthrough() {
        assert_eq!(normalize_css_color("White"), "rgb(255, 255, 255)");
        assert_eq!(normalize_css_color("transparent"), "rgba(0, 0, 0, 0)");
        assert_eq!(normalize_css_color("rgb(1, 2, 3)"), "rgb(1, 2, 3)");
        assert_eq!(normalize_css_color("var(--fg)"), "var(--fg)");
    }

    #[test]
    fn test_normalized_values_parse() {
        for authored in ["#abc", "navy", "#123456", "rgb(9, 8, 7)"] {
            assert!(parse_color(&normalize_css_color(authored)).is_some(), "{}", authored);
        }
    }
}
