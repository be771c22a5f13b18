//! CLI argument definitions for the registry tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use regpop_model::{DEFAULT_EXCLUDED_ROWS, DEFAULT_IDENTITY_COLUMN, DEFAULT_THRESHOLD};

#[derive(Parser)]
#[command(
    name = "regpop",
    version,
    about = "Regional population registry - normalize and analyse migration",
    long_about = "Load a wide-form regional population registry export, reshape it into\n\
                  one record per region, year and category, and report year-over-year\n\
                  population changes per region."
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
    /// Show row, region and record counts with the available years and categories.
    Summary(RegistryArgs),

    /// List the records of one year and category.
    Records(RecordsArgs),

    /// Show year-over-year population changes for one year and category.
    Deltas(DeltasArgs),

    /// Write the long-form table and the selection's deltas to a directory.
    Export(ExportArgs),
}

/// Where the registry lives and how to read it.
#[derive(Args)]
pub struct RegistryArgs {
    /// Path to the registry CSV export.
    #[arg(value_name = "REGISTRY")]
    pub registry: PathBuf,

    /// Text encoding of the registry file.
    #[arg(long = "encoding", value_enum, default_value = "euc-kr")]
    pub encoding: EncodingArg,

    /// Header of the column holding "<name>(<code>)" region labels.
    #[arg(long = "identity-column", default_value = DEFAULT_IDENTITY_COLUMN)]
    pub identity_column: String,

    /// 0-based data rows to drop (nationwide total, merged regions).
    #[arg(
        long = "exclude-rows",
        value_name = "ROWS",
        value_delimiter = ',',
        default_values_t = DEFAULT_EXCLUDED_ROWS
    )]
    pub exclude_rows: Vec<usize>,

    /// Keep every row, ignoring --exclude-rows.
    #[arg(long = "keep-all-rows")]
    pub keep_all_rows: bool,
}

/// Year and category to look at; defaults to the latest year and the first category.
#[derive(Args)]
pub struct SelectionArgs {
    #[arg(long = "year", value_name = "YEAR")]
    pub year: Option<i32>,

    #[arg(long = "category", value_name = "CATEGORY")]
    pub category: Option<String>,
}

#[derive(Parser)]
pub struct RecordsArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Order by population, largest first.
    #[arg(long = "sorted")]
    pub sorted: bool,
}

#[derive(Parser)]
pub struct DeltasArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Change a region must exceed to count as gaining or losing.
    #[arg(long = "threshold", default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: i64,

    /// Round tied percentages away from zero instead of to even.
    #[arg(long = "round-half-up")]
    pub round_half_up: bool,
}

#[derive(Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output directory (created if missing).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Change a region must exceed to count as gaining or losing.
    #[arg(long = "threshold", default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: i64,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EncodingArg {
    /// EUC-KR / CP949 (registry exports).
    EucKr,
    Utf8,
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
