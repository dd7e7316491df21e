// SPDX-License-Identifier: PMPL-1.0-or-later
//! Contrast checks and automatic contrast repair - WCAG 1.4.3 / 1.4.6
//!
//! - AA: 4.5:1 for normal text, 3:1 for large text
//! - AAA: 7:1 for normal text, 4.5:1 for large text
//!
//! Whether text counts as "large" is the caller's call; nothing here looks at
//! font metrics.

use super::{contrast_ratio, hex_to_rgb, relative_luminance, rgb_to_hex, Rgb};
use serde::{Deserialize, Serialize};

/// AA minimum for normal text
pub const AA_NORMAL: f64 = 4.5;
/// AAA minimum for normal text
pub const AAA_NORMAL: f64 = 7.0;
/// AA minimum for large text
pub const AA_LARGE: f64 = 3.0;
/// AAA minimum for large text
pub const AAA_LARGE: f64 = 4.5;

/// Default ratio `fix_contrast` aims for
pub const DEFAULT_TARGET_RATIO: f64 = AA_NORMAL;
/// Default iteration cap for `fix_contrast`
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Each fix step moves 5% of the remaining channel range
const STEP_PERCENT: f64 = 5.0;
/// A step scoring below this fraction of the best ratio ends the search
const REGRESSION_CUTOFF: f64 = 0.95;

const DARK_PALETTE: &[&str] = &["#000000", "#1a1a1a", "#2d3748", "#1e293b"];
const LIGHT_PALETTE: &[&str] = &["#ffffff", "#f7fafc", "#f1f5f9", "#e2e8f0"];

/// Pass/fail flags for every WCAG contrast threshold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContrastPasses {
    /// AA for the requested text size
    #[serde(rename = "AA")]
    pub aa: bool,
    /// AAA for the requested text size
    #[serde(rename = "AAA")]
    pub aaa: bool,
    /// AA for large text (3:1)
    #[serde(rename = "AALarge")]
    pub aa_large: bool,
    /// AAA for large text (4.5:1)
    #[serde(rename = "AAALarge")]
    pub aaa_large: bool,
}

/// Outcome of a single contrast check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastResult {
    /// Contrast ratio, `0.0` when either color was unparseable
    pub ratio: f64,
    pub passes: ContrastPasses,
    pub text_color: String,
    pub background_color: String,
}

/// Direction the fixer moved the text color in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixStrategy {
    Darken,
    Lighten,
    /// Already compliant, or the input could not be parsed
    None,
}

impl std::fmt::Display for FixStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixStrategy::Darken => write!(f, "darken"),
            FixStrategy::Lighten => write!(f, "lighten"),
            FixStrategy::None => write!(f, "none"),
        }
    }
}

/// Outcome of [`fix_contrast`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastFix {
    pub original: String,
    /// Best color found; equal to `original` when nothing better exists
    pub fixed: String,
    /// Ratio of `fixed` against the background
    pub ratio: f64,
    pub strategy: FixStrategy,
}

impl ContrastFix {
    fn unchanged(original: &str, ratio: f64) -> Self {
        Self {
            original: original.to_string(),
            fixed: original.to_string(),
            ratio,
            strategy: FixStrategy::None,
        }
    }

    /// Whether the fixed color reaches `target_ratio`
    pub fn meets(&self, target_ratio: f64) -> bool {
        self.ratio >= target_ratio
    }
}

/// Check a text/background pair against all WCAG thresholds
pub fn check_contrast(text_color: &str, background_color: &str, is_large_text: bool) -> ContrastResult {
    let ratio = contrast_ratio(text_color, background_color);
    let (aa, aaa) = if is_large_text {
        (ratio >= AA_LARGE, ratio >= AAA_LARGE)
    } else {
        (ratio >= AA_NORMAL, ratio >= AAA_NORMAL)
    };

    ContrastResult {
        ratio,
        passes: ContrastPasses {
            aa,
            aaa,
            aa_large: ratio >= AA_LARGE,
            aaa_large: ratio >= AAA_LARGE,
        },
        text_color: text_color.to_string(),
        background_color: background_color.to_string(),
    }
}

/// Channels kept unrounded between fix steps
#[derive(Debug, Clone, Copy)]
struct Channels {
    r: f64,
    g: f64,
    b: f64,
}

impl Channels {
    fn darken(self, percent: f64) -> Self {
        let factor = 1.0 - percent / 100.0;
        let step = |c: f64| (c * factor).clamp(0.0, 255.0);
        Self { r: step(self.r), g: step(self.g), b: step(self.b) }
    }

    fn lighten(self, percent: f64) -> Self {
        let factor = percent / 100.0;
        let step = |c: f64| (c + (255.0 - c) * factor).clamp(0.0, 255.0);
        Self { r: step(self.r), g: step(self.g), b: step(self.b) }
    }

    fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }
}

impl From<Rgb> for Channels {
    fn from(rgb: Rgb) -> Self {
        Self { r: f64::from(rgb.r), g: f64::from(rgb.g), b: f64::from(rgb.b) }
    }
}

/// Adjust `text_color` until it reaches `target_ratio` against `background_color`.
///
/// Greedy search: the direction is picked once from the background luminance
/// (light background darkens the text, dark background lightens it), then the
/// color moves in 5% steps. The search stops on success, when a step falls
/// below 95% of the best ratio seen, or after `max_iterations` steps, and
/// returns the best color found. The returned ratio is never lower than the
/// original one.
pub fn fix_contrast(
    text_color: &str,
    background_color: &str,
    target_ratio: f64,
    max_iterations: usize,
) -> ContrastFix {
    let (Some(text_rgb), Some(bg_rgb)) = (hex_to_rgb(text_color), hex_to_rgb(background_color)) else {
        return ContrastFix::unchanged(text_color, 0.0);
    };

    let current_ratio = contrast_ratio(text_color, background_color);
    if current_ratio >= target_ratio {
        return ContrastFix::unchanged(text_color, current_ratio);
    }

    let strategy = if relative_luminance(bg_rgb) > 0.5 {
        FixStrategy::Darken
    } else {
        FixStrategy::Lighten
    };

    let mut channels = Channels::from(text_rgb);
    let mut best_ratio = current_ratio;
    let mut best_color = text_color.to_string();

    for _ in 0..max_iterations {
        let candidate = match strategy {
            FixStrategy::Darken => channels.darken(STEP_PERCENT),
            _ => channels.lighten(STEP_PERCENT),
        };
        let candidate_hex = candidate.to_hex();
        let candidate_ratio = contrast_ratio(&candidate_hex, background_color);

        if candidate_ratio >= target_ratio {
            return ContrastFix {
                original: text_color.to_string(),
                fixed: candidate_hex,
                ratio: candidate_ratio,
                strategy,
            };
        }

        if candidate_ratio > best_ratio {
            best_ratio = candidate_ratio;
            best_color = candidate_hex;
            channels = candidate;
        }

        if candidate_ratio < best_ratio * REGRESSION_CUTOFF {
            break;
        }
    }

    ContrastFix {
        original: text_color.to_string(),
        fixed: best_color,
        ratio: best_ratio,
        strategy,
    }
}

/// Suggest text colors from a fixed palette that reach 4.5:1 against `base_color`.
///
/// Dark bases get light candidates and vice versa; palette order is kept.
pub fn suggest_accessible_pairs(base_color: &str) -> Vec<String> {
    let Some(base) = hex_to_rgb(base_color) else {
        return Vec::new();
    };

    let palette = if relative_luminance(base) < 0.5 {
        LIGHT_PALETTE
    } else {
        DARK_PALETTE
    };

    palette
        .iter()
        .filter(|candidate| contrast_ratio(candidate, base_color) >= AA_NORMAL)
        .map(|candidate| candidate.to_string())
        .collect()
}
