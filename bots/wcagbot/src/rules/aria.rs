// SPDX-License-Identifier: PMPL-1.0-or-later
//! ARIA reference integrity - WCAG 4.1.2 Name, Role, Value (Level A)
//!
//! `aria-labelledby` and `aria-describedby` hold whitespace-separated id
//! lists; every id must exist in the document.

use super::Rule;
use crate::document::{DocumentSnapshot, NodeId};
use crate::issue::{AccessibilityIssue, Severity, WcagLevel};

pub const RULE_ID: &str = "aria-references";

const ARIA_SELECTOR: &str = "[aria-label], [aria-labelledby], [aria-describedby], [role]";

pub struct AriaReferenceRule;

impl Rule for AriaReferenceRule {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Checks aria-labelledby/aria-describedby reference existing ids (WCAG 4.1.2)"
    }

    fn check(&self, document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue> {
        check_aria(document)
    }
}

struct Reference {
    attribute: &'static str,
    severity: Severity,
    suggestion: &'static str,
}

const REFERENCES: [Reference; 2] = [
    Reference {
        attribute: "aria-labelledby",
        severity: Severity::Serious,
        suggestion: "Ensure the referenced element exists or use aria-label instead",
    },
    Reference {
        attribute: "aria-describedby",
        severity: Severity::Moderate,
        suggestion: "Ensure the referenced element exists",
    },
];

/// Ids listed in `attribute` that no element carries
fn missing_ids<'a>(document: &'a dyn DocumentSnapshot, node: NodeId, attribute: &str) -> Vec<&'a str> {
    document
        .attribute(node, attribute)
        .map(|value| {
            value
                .split_whitespace()
                .filter(|id| document.element_by_id(id).is_none())
                .collect()
        })
        .unwrap_or_default()
}

pub fn check_aria(document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue> {
    let mut issues = Vec::new();

    for (index, element) in document.query_selector_all(ARIA_SELECTOR).into_iter().enumerate() {
        for reference in &REFERENCES {
            for (k, id) in missing_ids(document, element, reference.attribute).into_iter().enumerate() {
                // the first dangling id keeps the plain id; extra ones get a suffix
                let issue_id = match k {
                    0 => format!("{}-{}", reference.attribute, index),
                    _ => format!("{}-{}-{}", reference.attribute, index, k),
                };

                issues.push(
                    AccessibilityIssue::new(
                        issue_id,
                        reference.severity,
                        format!("{} references non-existent ID \"{}\"", reference.attribute, id),
                    )
                    .with_wcag("4.1.2 Name, Role, Value", WcagLevel::A)
                    .with_element(document.tag_name(element))
                    .with_suggestion(reference.suggestion),
                );
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlSnapshot;

    fn check(html: &str) -> Vec<AccessibilityIssue> {
        check_aria(&HtmlSnapshot::parse(html))
    }

    #[test]
    fn test_missing_labelledby_target() {
        let issues = check(r#"<div role="dialog" aria-labelledby="title">x</div>"#);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "aria-labelledby-0");
        assert_eq!(issues[0].severity, Severity::Serious);
        assert_eq!(issues[0].issue, "aria-labelledby references non-existent ID \"title\"");
        assert_eq!(issues[0].element, "div");
    }

    #[test]
    fn test_missing_describedby_target_is_moderate() {
        let issues = check(r#"<input aria-label="Name" aria-describedby="hint">"#);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "aria-describedby-0");
        assert_eq!(issues[0].severity, Severity::Moderate);
        assert_eq!(issues[0].suggestion, "Ensure the referenced element exists");
    }

    #[test]
    fn test_existing_targets_pass() {
        let issues = check(
            r#"<h2 id="t">Title</h2><p id="d">Desc</p>
               <section aria-labelledby="t" aria-describedby="d">x</section>"#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_multiple_missing_ids_get_unique_issue_ids() {
        let issues = check(
            r#"<nav role="navigation"></nav><span id="a"></span>
               <div role="group" aria-labelledby="a  b   c">x</div>"#,
        );
        let ids: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["aria-labelledby-1", "aria-labelledby-1-1"]);
        assert!(issues[1].issue.contains("\"c\""));
    }

    #[test]
    fn test_labelledby_reported_before_describedby() {
        let issues = check(r#"<div role="note" aria-describedby="x" aria-labelledby="y">z</div>"#);
        let ids: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["aria-labelledby-0", "aria-describedby-0"]);
    }
}
