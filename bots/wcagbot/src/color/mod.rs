// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color math for WCAG 2.1 contrast checks.
//!
//! Colors travel through the crate in two interchangeable forms: the
//! canonical [`Rgb`] triple and the 6-digit `#rrggbb` string. Parsing is
//! total: anything that is not a recognized color yields `None` (or a ratio
//! of `0.0` for [`contrast_ratio`]) rather than an error.
//!
//! - [`contrast`]: pass/fail thresholds, the auto-fix search and palette suggestions
//! - [`parse`]: CSS color syntax (hex, `rgb()`, `hsl()`) and computed-value normalization

pub mod contrast;
pub mod parse;

pub use contrast::{
    check_contrast, fix_contrast, suggest_accessible_pairs, ContrastFix, ContrastPasses,
    ContrastResult, FixStrategy,
};
pub use parse::{is_transparent, normalize_css_color, parse_color};

use serde::{Deserialize, Serialize};

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lower-case `#rrggbb` form
    pub fn to_hex(self) -> String {
        rgb_to_hex(f64::from(self.r), f64::from(self.g), f64::from(self.b))
    }

    /// WCAG relative luminance of this color
    pub fn luminance(self) -> f64 {
        relative_luminance(self)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Parse a 6-digit hex color, with or without the leading `#`.
///
/// Shorthand (`#fff`), alpha (`#rrggbbaa`) and named colors are rejected.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Format floating-point channels as `#rrggbb`, rounding to the nearest integer.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    format!("#{:02x}{:02x}{:02x}", to_byte(r), to_byte(g), to_byte(b))
}

fn to_byte(channel: f64) -> u8 {
    channel.round().clamp(0.0, 255.0) as u8
}

/// Linearize one sRGB channel (WCAG 2.1 definition, 0.03928 knee)
fn linearize(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Calculate relative luminance per WCAG 2.1
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
pub fn relative_luminance(rgb: Rgb) -> f64 {
    0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g) + 0.0722 * linearize(rgb.b)
}

/// Contrast ratio between two parsed colors, in `[1, 21]`
pub fn contrast_ratio_rgb(a: Rgb, b: Rgb) -> f64 {
    let l1 = relative_luminance(a);
    let l2 = relative_luminance(b);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two hex colors.
///
/// Returns `0.0` when either color does not parse.
pub fn contrast_ratio(a: &str, b: &str) -> f64 {
    match (hex_to_rgb(a), hex_to_rgb(b)) {
        (Some(a), Some(b)) => contrast_ratio_rgb(a, b),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#ff0000"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(hex_to_rgb("00FF7f"), Some(Rgb::new(0, 255, 127)));
        assert_eq!(hex_to_rgb("#1E293B"), Some(Rgb::new(30, 41, 59)));
    }

    #[test]
    fn test_hex_to_rgb_rejects_other_shapes() {
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#ff000080"), None);
        assert_eq!(hex_to_rgb("red"), None);
        assert_eq!(hex_to_rgb("#gg0000"), None);
        assert_eq!(hex_to_rgb("##ff0000"), None);
        assert_eq!(hex_to_rgb(""), None);
    }

    #[test]
    fn test_rgb_to_hex_rounds() {
        assert_eq!(rgb_to_hex(255.0, 0.0, 0.0), "#ff0000");
        assert_eq!(rgb_to_hex(0.4, 15.5, 254.6), "#0010ff");
        assert_eq!(rgb_to_hex(10.0, 11.0, 12.0), "#0a0b0c");
    }

    #[test]
    fn test_hex_round_trip_all_grays_and_channels() {
        for v in 0..=255u8 {
            let rgb = Rgb::new(v, 255 - v, v / 2);
            assert_eq!(hex_to_rgb(&rgb.to_hex()), Some(rgb));
        }
    }

    #[test]
    fn test_relative_luminance_bounds() {
        assert!((relative_luminance(Rgb::WHITE) - 1.0).abs() < 1e-9);
        assert!(relative_luminance(Rgb::BLACK).abs() < 1e-9);

        let mid = relative_luminance(Rgb::new(128, 64, 200));
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn test_relative_luminance_between_black_and_white() {
        let white = relative_luminance(Rgb::WHITE);
        let black = relative_luminance(Rgb::BLACK);
        let steps = [0u8, 1, 10, 17, 64, 100, 128, 200, 254, 255];

        for r in steps {
            for g in steps {
                for b in steps {
                    let rgb = Rgb::new(r, g, b);
                    if rgb == Rgb::WHITE || rgb == Rgb::BLACK {
                        continue;
                    }
                    let l = relative_luminance(rgb);
                    assert!(black < l && l < white, "{} has luminance {}", rgb, l);
                }
            }
        }
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio("#000000", "#ffffff");
        assert!((ratio - 21.0).abs() < 1e-9, "got {:.4}", ratio);
    }

    #[test]
    fn test_contrast_ratio_symmetric_and_identity() {
        let pairs = [("#ff0000", "#ffffff"), ("#1e293b", "#e2e8f0"), ("#777777", "#123456")];
        for (a, b) in pairs {
            assert!((contrast_ratio(a, b) - contrast_ratio(b, a)).abs() < 1e-12);
            assert!((contrast_ratio(a, a) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_contrast_ratio_unparseable_is_zero() {
        assert_eq!(contrast_ratio("#fff", "#000000"), 0.0);
        assert_eq!(contrast_ratio("#000000", "white"), 0.0);
    }

    #[test]
    fn test_gray_just_below_aa() {
        let ratio = contrast_ratio("#777777", "#ffffff");
        assert!(ratio < 4.5 && ratio > 4.4, "got {:.4}", ratio);
    }
}
