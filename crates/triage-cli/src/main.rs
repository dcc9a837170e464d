//! Triage registry CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use serde::Serialize;
use tracing::level_filters::LevelFilter;

use triage_cli::logging::{LogConfig, LogFormat, init_logging};
use triage_model::RegistryError;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_customers, run_health, run_registry};
use crate::summary::{print_customer_summary, print_health_summary, print_registry_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Customers(args) => report(run_customers(args), args.json, print_customer_summary),
        Command::Health(args) => report(run_health(args), args.json, print_health_summary),
        Command::Registry(args) => report(run_registry(args), args.json, print_registry_summary),
    };
    std::process::exit(exit_code);
}

/// Prints a command result and returns the process exit code.
fn report<T: Serialize>(result: anyhow::Result<T>, json: bool, print: fn(&T)) -> i32 {
    match result {
        Ok(run) if json => match serde_json::to_string_pretty(&run) {
            Ok(text) => {
                println!("{text}");
                0
            }
            Err(error) => {
                eprintln!("error: serialize results: {error}");
                1
            }
        },
        Ok(run) => {
            print(&run);
            0
        }
        Err(error) => match error.downcast_ref::<RegistryError>() {
            Some(registry) if !registry.is_failure() => {
                eprintln!("nothing to do: {registry}");
                0
            }
            _ => {
                eprintln!("error: {error:#}");
                1
            }
        },
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
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
