//! CLI argument definitions for the triage registry tool.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "triage",
    version,
    about = "Customer and patient registry triage",
    long_about = "Clean, classify and summarise customer and patient health registries.\n\n\
                  Reads CSV uploads, derives risk labels and demographic series, and\n\
                  exports the list of critical patients."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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

    /// Allow patient identifiers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Enrich a customer registry and print its insight series.
    Customers(CustomersArgs),

    /// Clean and classify a health registry and print its insight series.
    Health(HealthArgs),

    /// Run the full health pipeline and export critical patients.
    Registry(RegistryArgs),
}

#[derive(Args)]
pub struct CustomersArgs {
    /// Customer CSV with age, subscription_date, city and country columns.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Reference date for tenure (YYYY-MM-DD, default: today).
    #[arg(long = "as-of", value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    /// Print the series as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct HealthArgs {
    /// Health CSV with patient_id, age, BMI, disease_score, blood_pressure and sex columns.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Rows shown in the blood pressure cleaning preview.
    #[arg(long = "preview-rows", value_name = "N", default_value_t = triage_model::DEFAULT_PREVIEW_ROWS)]
    pub preview_rows: usize,

    /// Number of bins in the age histogram.
    #[arg(long = "bins", value_name = "N", default_value_t = triage_model::DEFAULT_HISTOGRAM_BINS)]
    pub bins: usize,

    #[command(flatten)]
    pub inputs: InputPolicyArgs,

    /// Print the series as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct RegistryArgs {
    /// Health CSV with patient_id, age, BMI, disease_score, blood_pressure and sex columns.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Path of the critical-patient export (default: critical_patients.csv next to the input).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Run the queries without writing the export.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    #[command(flatten)]
    pub inputs: InputPolicyArgs,

    /// Print the results as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct InputPolicyArgs {
    /// Reject the upload when BMI or disease_score is missing.
    ///
    /// By default such patients are kept and reported with an Unknown risk level.
    #[arg(long = "strict-inputs")]
    pub strict_inputs: bool,
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
