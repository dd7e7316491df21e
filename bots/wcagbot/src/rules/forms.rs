// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form controls
//!
//! - WCAG 4.1.2 Name, Role, Value: every visible control needs an accessible
//!   name (`<label for>`, `aria-label`, `aria-labelledby` or `title`)
//! - WCAG 1.3.1 Info and Relationships: a named radio group with more than one
//!   button belongs in a `<fieldset>`

use super::{non_empty, Rule};
use crate::document::{closest, DocumentSnapshot, NodeId};
use crate::issue::{AccessibilityIssue, Severity, WcagLevel};

pub const RULE_ID: &str = "form-labels";

const CONTROL_SELECTOR: &str = r#"input:not([type="hidden"]), select, textarea"#;

pub struct FormLabelRule;

impl Rule for FormLabelRule {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Checks form controls have labels and radio groups use fieldsets (WCAG 4.1.2, 1.3.1)"
    }

    fn check(&self, document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue> {
        check_form_accessibility(document)
    }
}

/// Whether some `<label for>` points at `id`
fn has_label_for(document: &dyn DocumentSnapshot, labels: &[NodeId], id: &str) -> bool {
    labels
        .iter()
        .any(|&label| document.attribute(label, "for") == Some(id))
}

pub fn check_form_accessibility(document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue> {
    let mut issues = Vec::new();
    let labels = document.query_selector_all("label[for]");

    for (index, control) in document.query_selector_all(CONTROL_SELECTOR).into_iter().enumerate() {
        let labelled = non_empty(document, control, "id")
            .is_some_and(|id| has_label_for(document, &labels, id));

        if labelled
            || non_empty(document, control, "aria-label").is_some()
            || non_empty(document, control, "aria-labelledby").is_some()
            || non_empty(document, control, "title").is_some()
        {
            continue;
        }

        let location = non_empty(document, control, "name")
            .or_else(|| non_empty(document, control, "placeholder"))
            .unwrap_or_default();

        issues.push(
            AccessibilityIssue::new(
                format!("form-label-{}", index),
                Severity::Critical,
                "Form control missing accessible label",
            )
            .with_wcag("4.1.2 Name, Role, Value", WcagLevel::A)
            .with_element(document.tag_name(control))
            .with_suggestion("Add a <label> element or aria-label attribute")
            .with_location(location),
        );
    }

    issues.extend(check_radio_groups(document));
    issues
}

/// Radio groups, reported in order of each group's first button
fn check_radio_groups(document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue> {
    let mut groups: Vec<(&str, Vec<NodeId>)> = Vec::new();

    for radio in document.query_selector_all(r#"input[type="radio"]"#) {
        let Some(name) = non_empty(document, radio, "name") else {
            continue;
        };
        match groups.iter_mut().find(|(n, _)| *n == name) {
            Some((_, members)) => members.push(radio),
            None => groups.push((name, vec![radio])),
        }
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .filter(|(_, members)| {
            !members
                .iter()
                .any(|&radio| closest(document, radio, "fieldset").is_some())
        })
        .map(|(name, _)| {
            AccessibilityIssue::new(
                format!("radio-fieldset-{}", name),
                Severity::Moderate,
                format!("Radio group \"{}\" not wrapped in <fieldset>", name),
            )
            .with_wcag("1.3.1 Info and Relationships", WcagLevel::A)
            .with_element("input[type=\"radio\"]")
            .with_suggestion("Wrap related radio buttons in <fieldset> with <legend>")
        })
        .collect()
}
