// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration for wcagbot

use crate::color::contrast::{DEFAULT_MAX_ITERATIONS, DEFAULT_TARGET_RATIO};
use crate::error::{Result, WcagbotError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = ".wcagbot.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub fix: FixConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions scanned when walking a directory
    pub extensions: Vec<String>,
    /// Directory names never descended into
    pub exclude: Vec<String>,
    /// Color assumed behind the page when no element paints a background.
    /// Unset means such elements are not contrast-checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_background: Option<String>,
    /// Rule ids to skip (`alt-text`, `color-contrast`, ...)
    pub disabled_rules: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixConfig {
    pub target_ratio: f64,
    pub max_iterations: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["html".to_string(), "htm".to_string()],
            exclude: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "target".to_string(),
                "dist".to_string(),
                "build".to_string(),
                "vendor".to_string(),
                ".astro".to_string(),
            ],
            canvas_background: None,
            disabled_rules: Vec::new(),
        }
    }
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            target_ratio: DEFAULT_TARGET_RATIO,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl Config {
    /// Reject values the scanner and fixer cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(1.0..=21.0).contains(&self.fix.target_ratio) {
            return Err(WcagbotError::Config(format!(
                "fix.target_ratio must be between 1 and 21, got {}",
                self.fix.target_ratio
            )));
        }
        if let Some(ref canvas) = self.scan.canvas_background {
            if crate::color::parse_color(canvas).is_none() {
                return Err(WcagbotError::InvalidColor(canvas.clone()));
            }
        }
        Ok(())
    }

    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        !self.scan.disabled_rules.iter().any(|r| r == rule_id)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

/// Load a TOML config; a missing file yields the defaults
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(&config)
        .map_err(|e| WcagbotError::Config(format!("TOML serialize error: {}", e)))?;

    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let config = load_config(&dir.path().join("absent.toml")).expect("defaults");
        assert_eq!(config, Config::default());
        assert_eq!(config.scan.extensions, vec!["html", "htm"]);
        assert_eq!(config.fix.max_iterations, 100);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("wcagbot.toml");
        std::fs::write(
            &path,
            "[scan]\ncanvas_background = \"#ffffff\"\ndisabled_rules = [\"color-contrast\"]\n",
        )
        .expect("write");

        let config = load_config(&path).expect("loads");
        assert_eq!(config.scan.canvas_background.as_deref(), Some("#ffffff"));
        assert!(!config.is_rule_enabled("color-contrast"));
        assert!(config.is_rule_enabled("alt-text"));
        assert_eq!(config.scan.extensions, vec!["html", "htm"]);
        assert!((config.fix.target_ratio - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_write_then_load_round_trip() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nested").join(".wcagbot.toml");
        write_default_config(&path).expect("writes");
        assert_eq!(load_config(&path).expect("loads"), Config::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("bad.toml");

        std::fs::write(&path, "[fix]\ntarget_ratio = 30.0\n").expect("write");
        assert!(matches!(load_config(&path), Err(WcagbotError::Config(_))));

        std::fs::write(&path, "[scan]\ncanvas_background = \"papayawhip\"\n").expect("write");
        assert!(matches!(load_config(&path), Err(WcagbotError::InvalidColor(_))));

        std::fs::write(&path, "[scan\n").expect("write");
        assert!(matches!(load_config(&path), Err(WcagbotError::Toml(_))));
    }
}
