// SPDX-License-Identifier: PMPL-1.0-or-later
//! Page language - WCAG 3.1.1 Language of Page (Level A)

use super::{non_empty, Rule};
use crate::document::DocumentSnapshot;
use crate::issue::{AccessibilityIssue, Severity, WcagLevel};

pub const RULE_ID: &str = "language";

pub struct LanguageRule;

impl Rule for LanguageRule {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Checks the document declares its language (WCAG 3.1.1)"
    }

    fn check(&self, document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue> {
        check_language(document)
    }
}

pub fn check_language(document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue> {
    let declared = document
        .document_element()
        .and_then(|root| non_empty(document, root, "lang"))
        .is_some();

    if declared {
        return Vec::new();
    }

    vec![AccessibilityIssue::new(
        "lang-missing",
        Severity::Serious,
        "Page language not declared",
    )
    .with_wcag("3.1.1 Language of Page", WcagLevel::A)
    .with_element("html")
    .with_suggestion("Add lang attribute to <html> element (e.g., lang=\"es\")")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlSnapshot;

    #[test]
    fn test_missing_lang() {
        let issues = check_language(&HtmlSnapshot::parse("<html><body></body></html>"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "lang-missing");
        assert_eq!(issues[0].severity, Severity::Serious);
        assert_eq!(issues[0].element, "html");
    }

    #[test]
    fn test_empty_lang_counts_as_missing() {
        assert_eq!(check_language(&HtmlSnapshot::parse(r#"<html lang=""></html>"#)).len(), 1);
    }

    #[test]
    fn test_declared_lang() {
        assert!(check_language(&HtmlSnapshot::parse(r#"<html lang="es-MX"></html>"#)).is_empty());
    }

    #[test]
    fn test_lang_on_body_is_not_enough() {
        let doc = HtmlSnapshot::parse(r#"<html><body lang="en"></body></html>"#);
        assert_eq!(check_language(&doc).len(), 1);
    }
}
