//! WISP Compliance Reporter CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

use wisp_cli::logging::{LogConfig, LogFormat, init_logging};
use wisp_validate::ValidationError;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_check, run_report};
use crate::summary::print_summary;

/// Exit code for a contract validation failure.
const EXIT_VALIDATION: i32 = 1;
/// Exit code for a technical failure (I/O, malformed inputs).
const EXIT_TECHNICAL: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_TECHNICAL);
    }
    let exit_code = match cli.command {
        Command::Run(args) => match run_report(&args) {
            Ok(result) => {
                print_summary(&result.document, result.report_path.as_deref());
                0
            }
            Err(error) => report_failure(&error),
        },
        Command::Check(args) => match run_check(&args) {
            Ok(document) => {
                print_summary(&document, None);
                println!("contract model validated");
                0
            }
            Err(error) => report_failure(&error),
        },
    };
    std::process::exit(exit_code);
}

/// Validation failures and technical failures get distinct exit codes so
/// schedulers can tell a contractual block from a broken input.
fn report_failure(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<ValidationError>().is_some() {
        eprintln!("contract validation error: {error}");
        EXIT_VALIDATION
    } else {
        eprintln!("error: {error:#}");
        EXIT_TECHNICAL
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
