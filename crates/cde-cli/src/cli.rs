//! CLI argument definitions for the data model quality tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cde-quality",
    version,
    about = "Data model quality tools - validate and convert catalogue data models",
    long_about = "Validate catalogue data models and convert them between the nested\n\
                  JSON tree and the flat variable table.\n\n\
                  Validation walks the whole tree and stops at the first violation\n\
                  with a path qualified diagnostic."
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
    /// Validate a data model JSON file.
    Validate(ValidateArgs),

    /// Flatten a data model into a variable table CSV.
    Export(ExportArgs),

    /// Rebuild a data model from a variable table CSV.
    Import(ImportArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the data model JSON file.
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Write a JSON validation report to this path.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Path to the data model JSON file.
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Output path for the variable table CSV.
    #[arg(long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Skip validating the model before flattening it.
    #[arg(long = "no-validate")]
    pub no_validate: bool,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Path to the variable table CSV file.
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Output path for the data model JSON.
    #[arg(long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Model label (defaults to the code derived from the table).
    #[arg(long = "label", value_name = "LABEL")]
    pub label: Option<String>,

    /// Model version recorded in the rebuilt model.
    #[arg(long = "model-version", value_name = "VERSION", default_value = "1.0")]
    pub model_version: String,

    /// Mark the rebuilt model as a longitudinal study.
    #[arg(long = "longitudinal")]
    pub longitudinal: bool,

    /// Dissolve groups that hold a single variable and no subgroups.
    #[arg(long = "squash-single-variable-groups")]
    pub squash_single_variable_groups: bool,

    /// Skip validating the rebuilt model before writing it.
    #[arg(long = "no-validate")]
    pub no_validate: bool,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
