// SPDX-License-Identifier: PMPL-1.0-or-later
//! Remediation recommendations derived from scan issues.
//!
//! Purely rule-based: each issue maps to one recommendation carrying its
//! suggestion, a priority and a testing tip. Images missing alt text also get
//! a placeholder description guessed from the file name.

use crate::issue::{AccessibilityIssue, Severity};
use serde::{Deserialize, Serialize};

const TESTING_TIP: &str = "Use browser DevTools and screen reader testing";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

impl From<Severity> for Priority {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Critical | Severity::Serious => Priority::High,
            Severity::Moderate | Severity::Minor => Priority::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub issue_id: String,
    pub priority: Priority,
    pub fix: String,
    pub explanation: String,
    pub testing_tip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_alt_text: Option<String>,
}

/// Placeholder alt text built from an image URL's file name.
///
/// `/img/team-photo_2024.jpg` becomes `Image: team photo 2024`.
pub fn heuristic_alt_text(image_url: &str) -> String {
    let file_name = image_url.rsplit('/').next().unwrap_or_default();
    let stem = file_name.split('.').next().unwrap_or_default();
    let stem = if stem.is_empty() { "image" } else { stem };
    format!("Image: {}", stem.replace(['-', '_'], " "))
}

fn is_missing_alt(issue: &AccessibilityIssue) -> bool {
    issue.id.starts_with("img-alt-") && !issue.id.starts_with("img-alt-empty-")
}

pub fn recommend(issue: &AccessibilityIssue) -> Recommendation {
    let suggested_alt_text = is_missing_alt(issue)
        .then(|| issue.location.as_deref())
        .flatten()
        .filter(|src| *src != "unknown")
        .map(heuristic_alt_text);

    Recommendation {
        issue_id: issue.id.clone(),
        priority: Priority::from(issue.severity),
        fix: issue.suggestion.clone(),
        explanation: format!(
            "WCAG {} requires proper {}",
            issue.wcag_criterion,
            issue.wcag_criterion.to_lowercase()
        ),
        testing_tip: TESTING_TIP.to_string(),
        suggested_alt_text,
    }
}

/// One recommendation per issue, in issue order
pub fn basic_recommendations(issues: &[AccessibilityIssue]) -> Vec<Recommendation> {
    issues.iter().map(recommend).collect()
}
