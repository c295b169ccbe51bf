//! CLI argument definitions for the WISP compliance reporter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "wisp-reporter",
    version,
    about = "WISP Compliance Reporter - Generate contract compliance reports",
    long_about = "Transform a WISPRO operations export into the contractual model,\n\
                  validate it against the declarative rule schema in strict mode,\n\
                  and render the monthly compliance report from a template."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build, validate and render the monthly compliance report.
    Run(RunArgs),

    /// Build and validate the contract model without rendering.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Operations export file (JSON).
    #[arg(value_name = "EXPORT")]
    pub export: PathBuf,

    /// Contract base skeleton (JSON).
    #[arg(long = "contract-base", value_name = "PATH")]
    pub contract_base: PathBuf,

    /// Rule tree with the boilerplate denylist (JSON).
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: PathBuf,

    /// Validation-mode configuration (YAML).
    #[arg(long = "mode-config", value_name = "PATH")]
    pub mode_config: PathBuf,

    /// Report template (Markdown).
    #[arg(long = "template", value_name = "PATH")]
    pub template: PathBuf,

    /// Where to write the rendered report.
    #[arg(long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Validate and render without writing the report.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Operations export file (JSON).
    #[arg(value_name = "EXPORT")]
    pub export: PathBuf,

    /// Contract base skeleton (JSON).
    #[arg(long = "contract-base", value_name = "PATH")]
    pub contract_base: PathBuf,

    /// Rule tree with the boilerplate denylist (JSON).
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: PathBuf,

    /// Validation-mode configuration (YAML).
    #[arg(long = "mode-config", value_name = "PATH")]
    pub mode_config: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
