// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alt text - WCAG 1.1.1 Non-text Content (Level A)
//!
//! - An `<img>` without an `alt` attribute is critical
//! - An `<img>` with `alt=""` is serious unless the image is marked decorative
//!
//! Decorative means `role="presentation"` or `aria-hidden="true"`.

use super::Rule;
use crate::document::{DocumentSnapshot, NodeId};
use crate::issue::{AccessibilityIssue, Severity, WcagLevel};

pub const RULE_ID: &str = "alt-text";

const CRITERION: &str = "1.1.1 Non-text Content";

pub struct AltTextRule;

impl Rule for AltTextRule {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Checks <img> elements for alt text (WCAG 1.1.1)"
    }

    fn check(&self, document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue> {
        check_image_alt(document)
    }
}

fn is_decorative(document: &dyn DocumentSnapshot, img: NodeId) -> bool {
    document.attribute(img, "role") == Some("presentation")
        || document.attribute(img, "aria-hidden") == Some("true")
}

pub fn check_image_alt(document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue> {
    let mut issues = Vec::new();

    for (index, img) in document.query_selector_all("img").into_iter().enumerate() {
        if is_decorative(document, img) {
            continue;
        }

        let src = document
            .attribute(img, "src")
            .filter(|s| !s.is_empty())
            .unwrap_or("unknown");
        let element = format!("<img src=\"{}\">", src);

        match document.attribute(img, "alt") {
            None => issues.push(
                AccessibilityIssue::new(
                    format!("img-alt-{}", index),
                    Severity::Critical,
                    "Image missing alt attribute",
                )
                .with_wcag(CRITERION, WcagLevel::A)
                .with_element(element)
                .with_suggestion("Add descriptive alt text or alt=\"\" for decorative images")
                .with_location(src),
            ),
            Some("") => issues.push(
                AccessibilityIssue::new(
                    format!("img-alt-empty-{}", index),
                    Severity::Serious,
                    "Non-decorative image has empty alt text",
                )
                .with_wcag(CRITERION, WcagLevel::A)
                .with_element(element)
                .with_suggestion("Provide meaningful alt text describing the image content")
                .with_location(src),
            ),
            Some(_) => {}
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlSnapshot;

    fn check(html: &str) -> Vec<AccessibilityIssue> {
        check_image_alt(&HtmlSnapshot::parse(html))
    }

    #[test]
    fn test_missing_alt() {
        let issues = check(r#"<img src="photo.jpg">"#);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "img-alt-0");
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].element, "<img src=\"photo.jpg\">");
        assert_eq!(issues[0].location.as_deref(), Some("photo.jpg"));
        assert_eq!(issues[0].wcag_criterion, "1.1.1 Non-text Content");
    }

    #[test]
    fn test_empty_alt_is_serious() {
        let issues = check(r#"<img src="a.png" alt="ok"><img src="b.png" alt="">"#);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "img-alt-empty-1");
        assert_eq!(issues[0].severity, Severity::Serious);
    }

    #[test]
    fn test_decorative_images_skipped() {
        let issues = check(
            r#"<img src="a.png" role="presentation">
               <img src="b.png" alt="" aria-hidden="true">
               <img src="c.png" aria-hidden="false">"#,
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "img-alt-2");
    }

    #[test]
    fn test_missing_src_reports_unknown() {
        let issues = check(r#"<img>"#);
        assert_eq!(issues[0].element, "<img src=\"unknown\">");
        assert_eq!(issues[0].location.as_deref(), Some("unknown"));
    }

    #[test]
    fn test_described_images_pass() {
        assert!(check(r#"<img src="team.jpg" alt="Our team at the 2024 offsite">"#).is_empty());
    }
}
