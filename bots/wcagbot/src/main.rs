// SPDX-License-Identifier: PMPL-1.0-or-later
//! Wcagbot CLI - WCAG 2.1 page scanner and contrast fixer
//!
//! Part of the gitbot-fleet ecosystem.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use wcagbot::color::{check_contrast, fix_contrast, normalize_css_color, parse_color, suggest_accessible_pairs};
use wcagbot::config::{default_config_path, load_config, write_default_config, Config};
use wcagbot::recommend::basic_recommendations;
use wcagbot::report::{generate_report, OutputFormat};
use wcagbot::{scanner, WcagbotError};

/// WCAG 2.1 accessibility scanner and contrast fixer for gitbot-fleet
#[derive(Parser)]
#[command(name = "wcagbot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan an HTML file or a directory of HTML files
    Scan {
        /// File or directory to scan
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file (defaults to ./.wcagbot.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Exit non-zero when any file scores below this
        #[arg(long)]
        fail_under: Option<u8>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Check the contrast of a text/background pair
    Contrast {
        /// Text color
        text: String,

        /// Background color
        background: String,

        /// Judge as large text (18pt, or 14pt bold)
        #[arg(long)]
        large: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Adjust a text color until it reaches a target contrast ratio
    Fix {
        /// Text color
        text: String,

        /// Background color
        background: String,

        /// Target ratio (config `fix.target_ratio` when omitted)
        #[arg(long)]
        target: Option<f64>,

        /// Iteration cap (config `fix.max_iterations` when omitted)
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Config file (defaults to ./.wcagbot.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Suggest accessible text colors for a background
    Suggest {
        /// Base (background) color
        base: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print remediation recommendations for every issue found
    Recommend {
        /// File or directory to scan
        path: PathBuf,

        /// Config file (defaults to ./.wcagbot.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Write a default config file
    InitConfig {
        /// Where to write it
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("wcagbot=debug")
    } else {
        EnvFilter::new("wcagbot=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Accept any supported color syntax and return `#rrggbb`
fn color_arg(value: &str) -> wcagbot::Result<String> {
    parse_color(&normalize_css_color(value))
        .or_else(|| parse_color(value))
        .map(|hex| hex.to_ascii_lowercase())
        .ok_or_else(|| WcagbotError::InvalidColor(value.to_string()))
}

fn load(config: Option<PathBuf>) -> anyhow::Result<Config> {
    let path = config.unwrap_or_else(default_config_path);
    load_config(&path).with_context(|| format!("loading config {}", path.display()))
}

fn pass_fail(passed: bool) -> &'static str {
    if passed {
        "PASS"
    } else {
        "FAIL"
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { path, format, output, config, fail_under, verbose } => {
            init_logging(verbose);
            let config = load(config)?;
            let report = scanner::scan_path(&path, &config)?;
            write_output(&generate_report(&report, format.into()), output.as_deref())?;

            let below_threshold = match (fail_under, report.min_score()) {
                (Some(threshold), Some(score)) => score < threshold,
                _ => false,
            };
            if report.has_critical() || below_threshold {
                std::process::exit(1);
            }
        }

        Commands::Contrast { text, background, large, json } => {
            init_logging(false);
            let result = check_contrast(&color_arg(&text)?, &color_arg(&background)?, large);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let size = if large { "large" } else { "normal" };
                println!(
                    "{} on {}: {:.2}:1",
                    result.text_color, result.background_color, result.ratio
                );
                println!("  AA ({} text):  {}", size, pass_fail(result.passes.aa));
                println!("  AAA ({} text): {}", size, pass_fail(result.passes.aaa));
                println!("  AA (large text):  {}", pass_fail(result.passes.aa_large));
                println!("  AAA (large text): {}", pass_fail(result.passes.aaa_large));
            }
        }

        Commands::Fix { text, background, target, max_iterations, config, json } => {
            init_logging(false);
            let config = load(config)?;
            let target = target.unwrap_or(config.fix.target_ratio);
            let max_iterations = max_iterations.unwrap_or(config.fix.max_iterations);

            let fix = fix_contrast(&color_arg(&text)?, &color_arg(&background)?, target, max_iterations);
            if !fix.meets(target) {
                warn!(
                    "Target {:.2}:1 not reached; best found is {:.2}:1",
                    target, fix.ratio
                );
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&fix)?);
            } else {
                println!(
                    "{} -> {} ({:.2}:1, {})",
                    fix.original, fix.fixed, fix.ratio, fix.strategy
                );
            }
        }

        Commands::Suggest { base, json } => {
            init_logging(false);
            let suggestions = suggest_accessible_pairs(&color_arg(&base)?);

            if json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else if suggestions.is_empty() {
                println!("No palette color reaches 4.5:1 against {}", base);
            } else {
                for color in suggestions {
                    println!("{}", color);
                }
            }
        }

        Commands::Recommend { path, config, output, verbose } => {
            init_logging(verbose);
            let config = load(config)?;
            let report = scanner::scan_path(&path, &config)?;

            let files: Vec<serde_json::Value> = report
                .files
                .iter()
                .map(|file| {
                    serde_json::json!({
                        "path": file.path.display().to_string(),
                        "recommendations": basic_recommendations(&file.result.issues),
                    })
                })
                .collect();
            let content = serde_json::to_string_pretty(&serde_json::json!({ "files": files }))?;
            write_output(&content, output.as_deref())?;
        }

        Commands::InitConfig { path, force } => {
            init_logging(false);
            let path = path.unwrap_or_else(default_config_path);
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            write_default_config(&path)?;
            eprintln!("Config written to {}", path.display());
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
