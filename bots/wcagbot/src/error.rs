// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for wcagbot
//!
//! The rule engine and color math never fail; these errors only surface at
//! the edges (reading files, loading config, CLI arguments).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WcagbotError>;

#[derive(Error, Debug)]
pub enum WcagbotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unrecognized color: {0}")]
    InvalidColor(String),
}
