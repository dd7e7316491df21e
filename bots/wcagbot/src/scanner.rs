// SPDX-License-Identifier: PMPL-1.0-or-later
//! File and directory scanning.
//!
//! Walks directory trees, parses every HTML file into a snapshot and runs the
//! configured rules over it. Each file is scored on its own.

use crate::config::Config;
use crate::document::HtmlSnapshot;
use crate::error::{Result, WcagbotError};
use crate::issue::{AccessibilityIssue, ScanResult, Severity};
use crate::rules::{rules_for, run_scan_with, Rule};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Result for one scanned file
#[derive(Debug, Clone, Serialize)]
pub struct FileScan {
    pub path: PathBuf,
    pub result: ScanResult,
}

/// Results for every file of one scan run, in walk order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub files: Vec<FileScan>,
}

impl ScanReport {
    pub fn total_issues(&self) -> usize {
        self.files.iter().map(|f| f.result.total_issues).sum()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.files.iter().map(|f| f.result.count(severity)).sum()
    }

    /// Lowest per-file score, `None` when nothing was scanned
    pub fn min_score(&self) -> Option<u8> {
        self.files.iter().map(|f| f.result.score).min()
    }

    pub fn has_critical(&self) -> bool {
        self.files.iter().any(|f| f.result.has_critical())
    }

    /// Every issue paired with the file it was found in
    pub fn issues(&self) -> impl Iterator<Item = (&Path, &AccessibilityIssue)> {
        self.files
            .iter()
            .flat_map(|f| f.result.issues.iter().map(move |i| (f.path.as_path(), i)))
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Scan HTML source held in memory
pub fn scan_source(source: &str, rules: &[Box<dyn Rule>]) -> ScanResult {
    let snapshot = HtmlSnapshot::parse(source);
    run_scan_with(&snapshot, rules)
}

fn scan_file_with(path: &Path, rules: &[Box<dyn Rule>]) -> Result<FileScan> {
    let content = std::fs::read_to_string(path)?;
    let result = scan_source(&content, rules);
    debug!("{}: {} issue(s), score {}", path.display(), result.total_issues, result.score);
    Ok(FileScan {
        path: path.to_path_buf(),
        result,
    })
}

/// Scan a single file
pub fn scan_file(path: &Path, config: &Config) -> Result<FileScan> {
    scan_file_with(path, &rules_for(config))
}

fn has_scannable_extension(path: &Path, config: &Config) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    config
        .scan
        .extensions
        .iter()
        .any(|wanted| wanted.eq_ignore_ascii_case(ext))
}

/// Scan a directory tree; unreadable files are logged and skipped
pub fn scan_directory(dir: &Path, config: &Config) -> Result<ScanReport> {
    let rules = rules_for(config);
    let mut report = ScanReport::default();

    info!("Scanning directory: {}", dir.display());

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // Skip hidden and excluded directories below the root
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_str().unwrap_or("");
            !name.starts_with('.') && !config.scan.exclude.iter().any(|x| x == name)
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || !has_scannable_extension(entry.path(), config) {
            continue;
        }

        match scan_file_with(entry.path(), &rules) {
            Ok(file) => report.files.push(file),
            Err(e) => warn!("Skipping {}: {}", entry.path().display(), e),
        }
    }

    info!(
        "Scanned {} files, found {} issues",
        report.files.len(),
        report.total_issues()
    );

    Ok(report)
}

/// Scan a file or a directory
pub fn scan_path(path: &Path, config: &Config) -> Result<ScanReport> {
    if path.is_dir() {
        scan_directory(path, config)
    } else if path.is_file() {
        Ok(ScanReport {
            files: vec![scan_file(path, config)?],
        })
    } else {
        Err(WcagbotError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BROKEN: &str = r#"<html><body><img src="a.png"></body></html>"#;
    const CLEAN: &str = r#"<html lang="en"><body><p>fine</p></body></html>"#;

    #[test]
    fn test_scan_nonexistent_dir() {
        let result = scan_directory(Path::new("/nonexistent/path"), &Config::default());
        // walkdir reports the missing root as an entry error, which is skipped
        assert!(result.expect("scan succeeds").is_empty());
    }

    #[test]
    fn test_scan_path_missing_is_error() {
        let result = scan_path(Path::new("/nonexistent/file.html"), &Config::default());
        assert!(matches!(result, Err(WcagbotError::Io(_))));
    }

    #[test]
    fn test_scan_directory_filters_and_excludes() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("index.html"), BROKEN).expect("write");
        std::fs::write(dir.path().join("about.HTM"), CLEAN).expect("write");
        std::fs::write(dir.path().join("notes.txt"), BROKEN).expect("write");
        std::fs::create_dir(dir.path().join("node_modules")).expect("mkdir");
        std::fs::write(dir.path().join("node_modules").join("x.html"), BROKEN).expect("write");
        std::fs::create_dir(dir.path().join(".cache")).expect("mkdir");
        std::fs::write(dir.path().join(".cache").join("y.html"), BROKEN).expect("write");

        let report = scan_directory(dir.path(), &Config::default()).expect("scan succeeds");
        let names: Vec<String> = report
            .files
            .iter()
            .filter_map(|f| f.path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(names, vec!["about.HTM", "index.html"]);
        assert_eq!(report.total_issues(), 2);
        assert_eq!(report.count(Severity::Critical), 1);
        assert_eq!(report.min_score(), Some(85));
        assert!(report.has_critical());
    }

    #[test]
    fn test_scan_single_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("page.html");
        std::fs::write(&path, CLEAN).expect("write");

        let report = scan_path(&path, &Config::default()).expect("scan succeeds");
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.min_score(), Some(100));
        assert_eq!(report.issues().count(), 0);
    }
}
