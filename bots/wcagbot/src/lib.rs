// SPDX-License-Identifier: PMPL-1.0-or-later
//! Wcagbot - WCAG 2.1 contrast math and page accessibility scanner
//!
//! Part of the gitbot-fleet ecosystem. Wcagbot checks HTML pages against a
//! fixed set of WCAG 2.1 rules, scores them 0-100 and repairs failing text
//! colors with a bounded contrast search.
//!
//! ## Color math
//!
//! Relative luminance, contrast ratios, AA/AAA pass flags, the auto-fix
//! search and accessible palette suggestions live in [`color`]. They never
//! fail: unparseable colors are `None` (or a ratio of `0.0`).
//!
//! ## Rules
//!
//! - **Alt Text** (1.1.1): missing or empty `alt` on non-decorative images
//! - **Contrast** (1.4.3): text against the background actually behind it
//! - **Headings** (1.3.1): skipped levels and repeated `<h1>`
//! - **Forms** (4.1.2/1.3.1): unlabelled controls and radio groups without fieldsets
//! - **Keyboard** (2.1.1/2.4.3): unreachable click handlers and positive tabindex
//! - **ARIA** (4.1.2): dangling `aria-labelledby`/`aria-describedby` ids
//! - **Language** (3.1.1): missing `lang` on `<html>`
//!
//! Rules run over any [`document::DocumentSnapshot`]; [`document::HtmlSnapshot`]
//! provides one from raw HTML with a small CSS cascade for computed colors.

pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod issue;
pub mod recommend;
pub mod report;
pub mod rules;
pub mod scanner;

pub use error::{Result, WcagbotError};
pub use issue::{AccessibilityIssue, ScanResult, Severity, WcagLevel};
pub use rules::run_accessibility_scan;
