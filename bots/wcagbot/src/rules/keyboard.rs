// SPDX-License-Identifier: PMPL-1.0-or-later
//! Keyboard access
//!
//! - WCAG 2.1.1 Keyboard: click handlers on elements a keyboard cannot reach
//! - WCAG 2.4.3 Focus Order: positive `tabindex` values

use super::Rule;
use crate::document::{text_excerpt, DocumentSnapshot};
use crate::issue::{AccessibilityIssue, Severity, WcagLevel};

pub const RULE_ID: &str = "keyboard";

/// Elements that are focusable and keyboard-operable without help
const INTERACTIVE_TAGS: &[&str] = &["a", "button", "input", "select", "textarea"];

pub struct KeyboardRule;

impl Rule for KeyboardRule {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Checks click handlers are keyboard reachable and tabindex is not positive (WCAG 2.1.1, 2.4.3)"
    }

    fn check(&self, document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue> {
        check_keyboard_accessibility(document)
    }
}

/// Integer prefix of `value` the way HTML's `parseInt` reads it
fn parse_int_prefix(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let magnitude = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

pub fn check_keyboard_accessibility(document: &dyn DocumentSnapshot) -> Vec<AccessibilityIssue> {
    let mut issues = Vec::new();

    for (index, element) in document
        .query_selector_all("[onclick], [ng-click]")
        .into_iter()
        .enumerate()
    {
        let tag = document.tag_name(element);
        if INTERACTIVE_TAGS.contains(&tag)
            || document.has_attribute(element, "tabindex")
            || document.attribute(element, "role") == Some("button")
        {
            continue;
        }

        issues.push(
            AccessibilityIssue::new(
                format!("keyboard-{}", index),
                Severity::Serious,
                "Click handler on non-keyboard-accessible element",
            )
            .with_wcag("2.1.1 Keyboard", WcagLevel::A)
            .with_element(tag)
            .with_suggestion("Add tabindex=\"0\" and keyboard event handlers, or use <button>")
            .with_location(text_excerpt(document, element, 50)),
        );
    }

    for (index, element) in document.query_selector_all("[tabindex]").into_iter().enumerate() {
        let raw = document
            .attribute(element, "tabindex")
            .filter(|v| !v.is_empty())
            .unwrap_or("0");
        let Some(tabindex) = parse_int_prefix(raw).filter(|&t| t > 0) else {
            continue;
        };

        issues.push(
            AccessibilityIssue::new(
                format!("tabindex-{}", index),
                Severity::Moderate,
                format!("Positive tabindex=\"{}\" disrupts natural tab order", tabindex),
            )
            .with_wcag("2.4.3 Focus Order", WcagLevel::A)
            .with_element(document.tag_name(element))
            .with_suggestion("Use tabindex=\"0\" or restructure HTML for logical tab order"),
        );
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlSnapshot;

    fn check(html: &str) -> Vec<AccessibilityIssue> {
        check_keyboard_accessibility(&HtmlSnapshot::parse(html))
    }

    #[test]
    fn test_div_with_click_handler() {
        let issues = check(r#"<div onclick="open()">Open menu</div>"#);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "keyboard-0");
        assert_eq!(issues[0].severity, Severity::Serious);
        assert_eq!(issues[0].element, "div");
        assert_eq!(issues[0].location.as_deref(), Some("Open menu"));
    }

    #[test]
    fn test_reachable_click_handlers_pass() {
        let issues = check(
            r#"<button onclick="a()">a</button>
               <a href="/menu" onclick="b()">b</a>
               <span onclick="c()" tabindex="0">c</span>
               <div ng-click="d()" role="button">d</div>"#,
        );
        assert!(issues.is_empty(), "{:?}", issues);
    }

    #[test]
    fn test_ng_click_counts_as_handler() {
        let issues = check(r#"<li onclick="x()">one</li><li ng-click="y()">two</li>"#);
        let ids: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["keyboard-0", "keyboard-1"]);
    }

    #[test]
    fn test_positive_tabindex() {
        let issues = check(
            r#"<a href="/" tabindex="0">home</a><input tabindex="3"><div tabindex="-1">x</div><span tabindex="2px">y</span>"#,
        );
        let ids: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["tabindex-1", "tabindex-3"]);
        assert_eq!(issues[0].issue, "Positive tabindex=\"3\" disrupts natural tab order");
        assert_eq!(issues[0].severity, Severity::Moderate);
        assert_eq!(issues[1].issue, "Positive tabindex=\"2\" disrupts natural tab order");
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("5"), Some(5));
        assert_eq!(parse_int_prefix("  +7x"), Some(7));
        assert_eq!(parse_int_prefix("-2"), Some(-2));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("1.9"), Some(1));
    }
}
