// SPDX-License-Identifier: PMPL-1.0-or-later
//! WCAG rule engine.
//!
//! Each rule inspects a [`DocumentSnapshot`] and returns issues in document
//! order. Rules share no state and never see each other's output; the scan
//! runs them in registry order and concatenates the results, so adding a rule
//! means adding it to [`default_rules`] and nothing else.

pub mod alt_text;
pub mod aria;
pub mod contrast;
pub mod forms;
pub mod headings;
pub mod keyboard;
pub mod language;

pub use alt_text::check_image_alt;
pub use aria::check_aria;
pub use contrast::check_color_contrast;
pub use forms::check_form_accessibility;
pub use headings::check_heading_hierarchy;
pub use keyboard::check_keyboard_accessibility;
pub use language::check_language;

use crate::config::Config;
use crate::document::DocumentSnapshot;
use crate::issue::{AccessibilityIssue, ScanResult};
use tracing::debug;

/// Trait implemented by all rules
pub trait Rule: Send + Sync {
    /// Stable identifier, used by `disabled_rules` in the config
    fn id(&self) -> &str;

    /// Short description of what this rule checks
    fn description(&self) -> &str;

    /// Inspect the document and report issues in document order
    fn check(&self, document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue>;
}

/// Every rule, in aggregation order
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(alt_text::AltTextRule),
        Box::new(contrast::ContrastRule::default()),
        Box::new(headings::HeadingRule),
        Box::new(forms::FormLabelRule),
        Box::new(keyboard::KeyboardRule),
        Box::new(aria::AriaReferenceRule),
        Box::new(language::LanguageRule),
    ]
}

/// The default registry adjusted by configuration: disabled rules removed
/// and the contrast rule given the configured canvas background
pub fn rules_for(config: &Config) -> Vec<Box<dyn Rule>> {
    default_rules()
        .into_iter()
        .filter(|rule| config.is_rule_enabled(rule.id()))
        .map(|rule| -> Box<dyn Rule> {
            if rule.id() == contrast::RULE_ID {
                Box::new(contrast::ContrastRule::with_canvas(
                    config.scan.canvas_background.clone(),
                ))
            } else {
                rule
            }
        })
        .collect()
}

/// Run every rule and aggregate the result
pub fn run_accessibility_scan(document: &dyn DocumentSnapshot) -> ScanResult {
    run_scan_with(document, &default_rules())
}

/// Run the given rules in order and aggregate the result
pub fn run_scan_with(document: &dyn DocumentSnapshot, rules: &[Box<dyn Rule>]) -> ScanResult {
    let mut issues = Vec::new();

    for rule in rules {
        let found = rule.check(document);
        debug!("Rule {} reported {} issue(s)", rule.id(), found.len());
        issues.extend(found);
    }

    ScanResult::from_issues(issues)
}

/// Attribute value, treating an empty string like an absent attribute
pub(crate) fn non_empty<'a>(
    document: &'a dyn DocumentSnapshot,
    node: crate::document::NodeId,
    name: &str,
) -> Option<&'a str> {
    document.attribute(node, name).filter(|v| !v.is_empty())
}
