// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for scan results.
//!
//! Supports multiple output formats:
//! - Text: human-readable issues grouped by severity, one section per file
//! - JSON: the export shape (`timestamp`, `score`, `summary`, `issues`) per file
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::issue::{AccessibilityIssue, ScanResult, ScoreBand, Severity};
use crate::scanner::ScanReport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Generate a report stamped with the current time
pub fn generate_report(report: &ScanReport, format: OutputFormat) -> String {
    generate_report_at(report, format, Utc::now())
}

/// Generate a report with an explicit timestamp (used by the JSON export)
pub fn generate_report_at(report: &ScanReport, format: OutputFormat, timestamp: DateTime<Utc>) -> String {
    match format {
        OutputFormat::Text => generate_text_report(report),
        OutputFormat::Json => generate_json_report(report, timestamp),
        OutputFormat::Sarif => generate_sarif_report(report),
    }
}

fn push_issue(output: &mut String, issue: &AccessibilityIssue) {
    output.push_str(&format!("[{}] {}\n", issue.id, issue.issue));
    output.push_str(&format!("  Element: {}\n", issue.element));
    if let Some(ref location) = issue.location {
        if !location.is_empty() {
            output.push_str(&format!("  Location: {}\n", location));
        }
    }
    output.push_str(&format!("  WCAG: {} (Level {})\n", issue.wcag_criterion, issue.wcag_level));
    output.push_str(&format!("  Fix: {}\n\n", issue.suggestion));
}

fn push_file_section(output: &mut String, path: &Path, result: &ScanResult) {
    output.push_str(&format!(
        "--- {} --- score {}/100 ({})\n",
        path.display(),
        result.score,
        result.band()
    ));

    if result.is_empty() {
        output.push_str("No accessibility issues found.\n\n");
        return;
    }

    output.push_str(&format!(
        "{} issue(s): {} critical, {} serious, {} moderate, {} minor\n\n",
        result.total_issues, result.critical, result.serious, result.moderate, result.minor
    ));

    for severity in Severity::ALL {
        for issue in result.by_severity(severity) {
            output.push_str(&format!("{} ", severity));
            push_issue(output, issue);
        }
    }
}

/// Generate human-readable text report
fn generate_text_report(report: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str("=== wcagbot WCAG 2.1 Accessibility Report ===\n\n");

    if report.is_empty() {
        output.push_str("No files scanned.\n");
        return output;
    }

    for file in &report.files {
        push_file_section(&mut output, &file.path, &file.result);
    }

    output.push_str(&format!(
        "Scanned {} file(s), {} issue(s): {} critical, {} serious, {} moderate, {} minor\n",
        report.files.len(),
        report.total_issues(),
        report.count(Severity::Critical),
        report.count(Severity::Serious),
        report.count(Severity::Moderate),
        report.count(Severity::Minor),
    ));

    if report.has_critical() {
        output.push_str("RESULT: FAIL (critical issues found)\n");
    } else if report.total_issues() > 0 {
        output.push_str("RESULT: PASS WITH WARNINGS\n");
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

/// Severity counts of the JSON export
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub total_issues: usize,
    pub critical: usize,
    pub serious: usize,
    pub moderate: usize,
    pub minor: usize,
}

/// Exported result of one file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedScan<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub score: u8,
    pub band: ScoreBand,
    pub summary: ExportSummary,
    pub issues: &'a [AccessibilityIssue],
}

/// The export shape of one scan result
pub fn export_result<'a>(
    result: &'a ScanResult,
    path: Option<&Path>,
    timestamp: DateTime<Utc>,
) -> ExportedScan<'a> {
    ExportedScan {
        path: path.map(|p| p.display().to_string()),
        timestamp,
        score: result.score,
        band: result.band(),
        summary: ExportSummary {
            total_issues: result.total_issues,
            critical: result.critical,
            serious: result.serious,
            moderate: result.moderate,
            minor: result.minor,
        },
        issues: &result.issues,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    tool: &'static str,
    version: &'static str,
    timestamp: DateTime<Utc>,
    files: Vec<ExportedScan<'a>>,
}

/// Generate JSON report
fn generate_json_report(report: &ScanReport, timestamp: DateTime<Utc>) -> String {
    let json = JsonReport {
        tool: "wcagbot",
        version: env!("CARGO_PKG_VERSION"),
        timestamp,
        files: report
            .files
            .iter()
            .map(|f| export_result(&f.result, Some(f.path.as_path()), timestamp))
            .collect(),
    };

    serde_json::to_string_pretty(&json).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize report: {}\"}}", e)
    })
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    #[serde(rename = "informationUri")]
    information_uri: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

fn sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::Serious => "error",
        Severity::Moderate => "warning",
        Severity::Minor => "note",
    }
}

/// `WCAG-1.4.3` from "1.4.3 Contrast (Minimum)"
fn sarif_rule_id(issue: &AccessibilityIssue) -> String {
    match issue.wcag_criterion.split_whitespace().next() {
        Some(number) => format!("WCAG-{}", number),
        None => issue.id.clone(),
    }
}

/// Generate SARIF report
fn generate_sarif_report(report: &ScanReport) -> String {
    let results: Vec<SarifResult> = report
        .issues()
        .map(|(path, issue)| SarifResult {
            rule_id: sarif_rule_id(issue),
            level: sarif_level(issue.severity).to_string(),
            message: SarifMessage {
                text: format!("{} [{}]: {}", issue.issue, issue.id, issue.suggestion),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifactLocation {
                        uri: path.display().to_string(),
                    },
                },
            }],
        })
        .collect();

    let sarif = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "wcagbot".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: "https://www.w3.org/TR/WCAG21/".to_string(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&sarif).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::WcagLevel;
    use crate::scanner::FileScan;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn sample_report() -> ScanReport {
        let issues = vec![
            AccessibilityIssue::new("img-alt-0", Severity::Critical, "Image missing alt attribute")
                .with_wcag("1.1.1 Non-text Content", WcagLevel::A)
                .with_element("<img src=\"a.png\">")
                .with_suggestion("Add descriptive alt text")
                .with_location("a.png"),
            AccessibilityIssue::new("heading-skip-1", Severity::Moderate, "Heading level skipped from h1 to h3")
                .with_wcag("1.3.1 Info and Relationships", WcagLevel::A)
                .with_element("h3")
                .with_suggestion("Use sequential heading levels"),
        ];
        ScanReport {
            files: vec![FileScan {
                path: PathBuf::from("site/index.html"),
                result: ScanResult::from_issues(issues),
            }],
        }
    }

    #[test]
    fn test_text_report_empty() {
        let report = generate_report(&ScanReport::default(), OutputFormat::Text);
        assert!(report.contains("No files scanned"));
    }

    #[test]
    fn test_text_report_with_issues() {
        let report = generate_report(&sample_report(), OutputFormat::Text);
        assert!(report.contains("site/index.html"));
        assert!(report.contains("score 88/100 (fair)"));
        assert!(report.contains("CRITICAL [img-alt-0] Image missing alt attribute"));
        assert!(report.contains("WCAG: 1.1.1 Non-text Content (Level A)"));
        assert!(report.contains("RESULT: FAIL"));
        let critical_at = report.find("CRITICAL").expect("critical listed");
        let moderate_at = report.find("MODERATE").expect("moderate listed");
        assert!(critical_at < moderate_at);
    }

    #[test]
    fn test_json_report_export_shape() {
        let timestamp = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).single().expect("valid time");
        let report = generate_report_at(&sample_report(), OutputFormat::Json, timestamp);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");

        assert_eq!(parsed["tool"], "wcagbot");
        let file = &parsed["files"][0];
        assert_eq!(file["path"], "site/index.html");
        assert_eq!(file["timestamp"], "2025-03-01T12:00:00Z");
        assert_eq!(file["score"], 88);
        assert_eq!(file["band"], "fair");
        assert_eq!(file["summary"]["totalIssues"], 2);
        assert_eq!(file["summary"]["critical"], 1);
        assert_eq!(file["summary"]["moderate"], 1);
        assert_eq!(file["issues"][0]["wcagCriterion"], "1.1.1 Non-text Content");
    }

    #[test]
    fn test_sarif_report() {
        let report = generate_report(&sample_report(), OutputFormat::Sarif);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert_eq!(parsed["version"], "2.1.0");
        let results = &parsed["runs"][0]["results"];
        assert_eq!(results[0]["ruleId"], "WCAG-1.1.1");
        assert_eq!(results[0]["level"], "error");
        assert_eq!(results[1]["level"], "warning");
        assert_eq!(
            results[0]["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
            "site/index.html"
        );
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("sarif".parse::<OutputFormat>().unwrap(), OutputFormat::Sarif);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
