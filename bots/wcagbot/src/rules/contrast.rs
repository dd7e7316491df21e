// SPDX-License-Identifier: PMPL-1.0-or-later
//! Text contrast in context - WCAG 1.4.3 Contrast (Minimum) (Level AA)
//!
//! Every text-bearing element matched by [`TEXT_SELECTOR`] is checked against
//! the background actually painted behind it: its own background if opaque,
//! otherwise the nearest ancestor with an opaque, parseable background.
//! Elements whose colors cannot be resolved are skipped, not reported.

use super::Rule;
use crate::color::contrast::AA_NORMAL;
use crate::color::{contrast_ratio, is_transparent, parse_color};
use crate::document::{ancestors, text_excerpt, DocumentSnapshot, NodeId, StyleProperty};
use crate::issue::{AccessibilityIssue, Severity, WcagLevel};
use tracing::debug;

pub const RULE_ID: &str = "color-contrast";

/// Elements whose text is checked
pub const TEXT_SELECTOR: &str = "p, h1, h2, h3, h4, h5, h6, a, button, span, div, li, td, th, label";

#[derive(Debug, Clone, Default)]
pub struct ContrastRule {
    canvas_background: Option<String>,
}

impl ContrastRule {
    /// Use `canvas` when no element in the chain paints a background
    pub fn with_canvas(canvas: Option<String>) -> Self {
        Self {
            canvas_background: canvas,
        }
    }
}

impl Rule for ContrastRule {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Checks text/background contrast ratios (WCAG 1.4.3)"
    }

    fn check(&self, document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue> {
        check_color_contrast_with(document, self.canvas_background.as_deref())
    }
}

pub fn check_color_contrast(document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue> {
    check_color_contrast_with(document, None)
}

pub fn check_color_contrast_with(
    document: &dyn DocumentSnapshot,
    canvas_background: Option<&str>,
) -> Vec<AccessibilityIssue> {
    let canvas = canvas_background.and_then(parse_color);
    let mut issues = Vec::new();
    let mut unresolved = 0usize;

    for (index, node) in document.query_selector_all(TEXT_SELECTOR).into_iter().enumerate() {
        if document.text_content(node).trim().is_empty() {
            continue;
        }

        let text_color = document
            .computed_style(node, StyleProperty::Color)
            .and_then(|c| parse_color(&c));
        let background = resolve_background(document, node, canvas.as_deref());

        let (Some(text_color), Some(background)) = (text_color, background) else {
            unresolved += 1;
            continue;
        };

        let ratio = contrast_ratio(&text_color, &background);
        if ratio < AA_NORMAL {
            issues.push(
                AccessibilityIssue::new(
                    format!("contrast-{}", index),
                    Severity::Serious,
                    format!("Insufficient contrast ratio: {:.2}:1 (minimum 4.5:1)", ratio),
                )
                .with_wcag("1.4.3 Contrast (Minimum)", WcagLevel::AA)
                .with_element(document.tag_name(node))
                .with_suggestion(format!(
                    "Increase contrast between text ({}) and background ({})",
                    text_color, background
                ))
                .with_location(text_excerpt(document, node, 50)),
            );
        }
    }

    if unresolved > 0 {
        debug!("Contrast skipped for {} element(s) without resolvable colors", unresolved);
    }

    issues
}

/// The background painted behind `node`, as `#rrggbb`.
///
/// An opaque but unparseable background on the element itself yields `None`;
/// unparseable ancestor backgrounds are stepped over.
pub fn resolve_background(
    document: &dyn DocumentSnapshot,
    node: NodeId,
    canvas: Option<&str>,
) -> Option<String> {
    if let Some(own) = document.computed_style(node, StyleProperty::BackgroundColor) {
        if !is_transparent(&own) {
            return parse_color(&own);
        }
    }

    ancestors(document, node)
        .filter_map(|ancestor| document.computed_style(ancestor, StyleProperty::BackgroundColor))
        .filter(|bg| !is_transparent(bg))
        .find_map(|bg| parse_color(&bg))
        .or_else(|| canvas.map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlSnapshot;

    fn check(html: &str) -> Vec<AccessibilityIssue> {
        check_color_contrast(&HtmlSnapshot::parse(html))
    }

    #[test]
    fn test_low_contrast_own_background() {
        let issues = check(r#"<p style="color: #777777; background-color: #ffffff">Hello</p>"#);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "contrast-0");
        assert_eq!(issues[0].severity, Severity::Serious);
        assert_eq!(issues[0].wcag_level, WcagLevel::AA);
        assert_eq!(issues[0].element, "p");
        assert_eq!(issues[0].issue, "Insufficient contrast ratio: 4.48:1 (minimum 4.5:1)");
        assert_eq!(
            issues[0].suggestion,
            "Increase contrast between text (#777777) and background (#ffffff)"
        );
        assert_eq!(issues[0].location.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_background_resolved_through_transparent_ancestors() {
        let issues = check(
            r#"<html><head><style>.dark { background: #1a1a1a; } .inner { background: transparent; }</style></head>
            <body><section class="dark"><article class="inner"><p style="color: #333333">Dim</p></article></section></body></html>"#,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].suggestion.contains("(#1a1a1a)"));
    }

    #[test]
    fn test_sufficient_contrast_passes() {
        assert!(check(r#"<body style="background: #ffffff"><p style="color: #000000">ok</p></body>"#).is_empty());
    }

    #[test]
    fn test_no_background_anywhere_is_skipped() {
        assert!(check(r#"<p style="color: #eeeeee">unknown backdrop</p>"#).is_empty());
    }

    #[test]
    fn test_canvas_background_fallback() {
        let doc = HtmlSnapshot::parse(r#"<p style="color: #eeeeee">pale</p>"#);
        let issues = check_color_contrast_with(&doc, Some("#ffffff"));
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_unparseable_colors_skipped() {
        assert!(check(r#"<body style="background: #fff"><p style="color: var(--muted)">x</p></body>"#).is_empty());
        assert!(check(r#"<p style="color: #eee; background: linear-gradient(red, blue)">x</p>"#).is_empty());
    }

    #[test]
    fn test_unreadable_own_background_not_judged_against_ancestor() {
        let backgrounds = [
            "background-color: var(--card)",
            "background: var(--card)",
            "background: linear-gradient(to right, navy, black)",
            "background: url(tile.png) image-set(a.png 1x)",
        ];
        for background in backgrounds {
            let html = format!(
                r#"<body style="background: #fff"><p style="color: #eeeeee; {}">themed</p></body>"#,
                background
            );
            assert!(check(&html).is_empty(), "{} was judged against the body", background);
        }
    }

    #[test]
    fn test_image_only_shorthand_falls_through_to_ancestor() {
        let issues = check(
            r#"<body style="background: #fff"><p style="color: #eeeeee; background: url(tile.png) no-repeat">pale</p></body>"#,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].suggestion.contains("(#ffffff)"));
    }

    #[test]
    fn test_index_counts_elements_without_text() {
        let issues = check(
            r#"<body style="background: #ffffff"><div><span></span><p style="color: #cccccc">faint</p></div></body>"#,
        );
        // div (0) contains "faint" but is black on white; span (1) is empty
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "contrast-2");
    }

    #[test]
    fn test_location_truncated_to_50_chars() {
        let long = "x".repeat(80);
        let html = format!(r#"<p style="color: #999999; background: #aaaaaa">{}</p>"#, long);
        let issues = check(&html);
        assert_eq!(issues[0].location.as_deref().map(str::len), Some(50));
    }
}
