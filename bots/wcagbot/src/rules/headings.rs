// SPDX-License-Identifier: PMPL-1.0-or-later
//! Heading structure - WCAG 1.3.1 Info and Relationships (Level A)
//!
//! Headings must not jump down more than one level at a time, and a page
//! should carry a single `<h1>`.

use super::Rule;
use crate::document::{text_excerpt, DocumentSnapshot};
use crate::issue::{AccessibilityIssue, Severity, WcagLevel};

pub const RULE_ID: &str = "heading-hierarchy";

const CRITERION: &str = "1.3.1 Info and Relationships";

pub struct HeadingRule;

impl Rule for HeadingRule {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Checks heading levels are sequential and h1 is unique (WCAG 1.3.1)"
    }

    fn check(&self, document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue> {
        check_heading_hierarchy(document)
    }
}

fn heading_level(tag: &str) -> Option<u8> {
    tag.strip_prefix('h')?.parse().ok()
}

pub fn check_heading_hierarchy(document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue> {
    let mut issues = Vec::new();
    let mut previous_level = 0u8;

    let headings = document.query_selector_all("h1, h2, h3, h4, h5, h6");
    for (index, heading) in headings.into_iter().enumerate() {
        let Some(level) = heading_level(document.tag_name(heading)) else {
            continue;
        };

        if previous_level > 0 && level > previous_level + 1 {
            issues.push(
                AccessibilityIssue::new(
                    format!("heading-skip-{}", index),
                    Severity::Moderate,
                    format!("Heading level skipped from h{} to h{}", previous_level, level),
                )
                .with_wcag(CRITERION, WcagLevel::A)
                .with_element(document.tag_name(heading))
                .with_suggestion("Use sequential heading levels (h1 -> h2 -> h3, etc.)")
                .with_location(text_excerpt(document, heading, 50)),
            );
        }

        previous_level = level;
    }

    let h1_count = document.query_selector_all("h1").len();
    if h1_count > 1 {
        issues.push(
            AccessibilityIssue::new(
                "multiple-h1",
                Severity::Moderate,
                format!("Multiple h1 elements found ({})", h1_count),
            )
            .with_wcag(CRITERION, WcagLevel::A)
            .with_element("h1")
            .with_suggestion("Use only one h1 per page for the main heading"),
        );
    }

    issues
}
