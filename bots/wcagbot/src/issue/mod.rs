// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility issues and scan results.
//!
//! Field names serialize in camelCase (`wcagLevel`, `totalIssues`, ...) so the
//! JSON output matches what web front-ends already consume.

use serde::{Deserialize, Serialize};

/// Nominal number of checks a scan is considered to perform.
///
/// This does not count rule evaluations; `passedChecks` derived from it is a
/// display figure only.
pub const TOTAL_CHECKS: usize = 50;

/// Issue severity, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Serious,
    Moderate,
    Minor,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Serious,
        Severity::Moderate,
        Severity::Minor,
    ];

    /// Points deducted from the score per issue of this severity
    pub fn penalty(self) -> u32 {
        match self {
            Severity::Critical => 10,
            Severity::Serious => 5,
            Severity::Moderate => 2,
            Severity::Minor => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Serious => "serious",
            Severity::Moderate => "moderate",
            Severity::Minor => "minor",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// WCAG conformance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// One accessibility finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityIssue {
    /// Rule-prefixed id, unique within one scan (e.g. `img-alt-0`)
    pub id: String,
    pub severity: Severity,
    pub wcag_level: WcagLevel,
    /// Success criterion label, e.g. "1.4.3 Contrast (Minimum)"
    pub wcag_criterion: String,
    /// Offending element, usually its tag name
    pub element: String,
    /// What is wrong
    pub issue: String,
    /// How to fix it
    pub suggestion: String,
    /// Source attribute or text excerpt, for display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl AccessibilityIssue {
    /// Create an issue; criterion, element and suggestion are filled in by the builders
    pub fn new(id: impl Into<String>, severity: Severity, issue: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            severity,
            wcag_level: WcagLevel::A,
            wcag_criterion: String::new(),
            element: String::new(),
            issue: issue.into(),
            suggestion: String::new(),
            location: None,
        }
    }

    /// Set the WCAG criterion and level
    pub fn with_wcag(mut self, criterion: &str, level: WcagLevel) -> Self {
        self.wcag_criterion = criterion.to_string();
        self.wcag_level = level;
        self
    }

    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = element.into();
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Display band for a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
    Failing,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => ScoreBand::Good,
            70..=89 => ScoreBand::Fair,
            50..=69 => ScoreBand::Poor,
            _ => ScoreBand::Failing,
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreBand::Good => write!(f, "good"),
            ScoreBand::Fair => write!(f, "fair"),
            ScoreBand::Poor => write!(f, "poor"),
            ScoreBand::Failing => write!(f, "failing"),
        }
    }
}

/// Aggregate of one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub total_issues: usize,
    pub critical: usize,
    pub serious: usize,
    pub moderate: usize,
    pub minor: usize,
    /// Rule order, then document order within a rule
    pub issues: Vec<AccessibilityIssue>,
    /// 0-100, higher is better
    pub score: u8,
    pub passed_checks: usize,
    pub total_checks: usize,
}

impl ScanResult {
    /// Tally severities and compute the score
    pub fn from_issues(issues: Vec<AccessibilityIssue>) -> Self {
        let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
        let critical = count(Severity::Critical);
        let serious = count(Severity::Serious);
        let moderate = count(Severity::Moderate);
        let minor = count(Severity::Minor);

        let penalty: u64 = issues
            .iter()
            .map(|i| u64::from(i.severity.penalty()))
            .sum();
        let score = 100u64.saturating_sub(penalty) as u8;

        Self {
            total_issues: issues.len(),
            critical,
            serious,
            moderate,
            minor,
            passed_checks: TOTAL_CHECKS.saturating_sub(issues.len()),
            total_checks: TOTAL_CHECKS,
            score,
            issues,
        }
    }

    pub fn by_severity(&self, severity: Severity) -> Vec<&AccessibilityIssue> {
        self.issues.iter().filter(|i| i.severity == severity).collect()
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::Serious => self.serious,
            Severity::Moderate => self.moderate,
            Severity::Minor => self.minor,
        }
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }

    pub fn has_critical(&self) -> bool {
        self.critical > 0
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl Default for ScanResult {
    fn default() -> Self {
        Self::from_issues(Vec::new())
    }
}
