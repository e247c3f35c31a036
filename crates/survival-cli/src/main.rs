//! Survival analyzer CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use survival_cli::logging::{LogConfig, init_logging};
use survival_ingest::IngestError;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{emit_report, run_analyze, run_schema};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Analyze(args) => {
            match run_analyze(&args).and_then(|report| emit_report(&report, &args)) {
                Ok(()) => 0,
                Err(error) => {
                    report_error(&error);
                    1
                }
            }
        }
        Command::Schema => match run_schema() {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) {
    match error.downcast_ref::<IngestError>() {
        Some(IngestError::NoData) => {
            eprintln!("error: the file must contain at least one row of data to be analyzed");
        }
        Some(IngestError::Io { .. }) | None => eprintln!("error: {error:#}"),
        Some(_) => eprintln!("error: the file must contain data in a valid format: {error:#}"),
    }
}

/// Logging setup from the global flags. An explicit `-v`/`-q` or
/// `--log-level` pins the level; otherwise `RUST_LOG` may override it.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level = cli
        .log_level
        .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from);
    let explicit = cli.verbosity.is_present() || cli.log_level.is_some();
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level_filter(level)
        .with_explicit_level(explicit)
        .with_format(cli.log_format.into())
        .with_timestamps(cli.log_timestamps)
        .with_target(cli.log_target)
        .with_ansi(ansi)
        .with_log_file(cli.log_file.clone())
}

#[cfg(test)]
mod tests {
    use survival_cli::logging::LogFormat;

    use super::*;

    fn config_for(args: &[&str]) -> LogConfig {
        let mut argv = vec!["survival-cli"];
        argv.extend_from_slice(args);
        argv.push("schema");
        log_config_from_cli(&Cli::try_parse_from(argv).expect("parse cli"))
    }

    #[test]
    fn defaults_defer_to_rust_log() {
        let config = config_for(&[]);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert!(!config.with_timestamps);
        assert!(!config.with_target);
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn log_flags_reach_the_config() {
        let config = config_for(&[
            "--log-level",
            "debug",
            "--log-format",
            "compact",
            "--log-timestamps",
            "--log-target",
            "--color",
            "never",
        ]);
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
        assert!(config.with_timestamps);
        assert!(config.with_target);
        assert!(!config.with_ansi);
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn verbosity_flag_pins_level() {
        let config = config_for(&["-v"]);
        assert_eq!(config.level_filter, LevelFilter::INFO);
        assert!(!config.use_env_filter);
    }
}
