//! CLI argument definitions for the scanning station.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "intake",
    version,
    about = "Sample intake scanner - check a shipment against its manifest",
    long_about = "Check received samples against a shipment manifest.\n\n\
                  Load a CSV/TSV manifest, pick the sample column, then scan barcodes\n\
                  from stdin. The scanned table is exported as scanned_<manifest>."
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

    /// Include operator names in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show a manifest's columns and the suggested column mapping.
    Columns(ColumnsArgs),

    /// Scan barcodes from stdin against a manifest.
    ///
    /// Each line is a barcode. `>ID` skips ahead to ID, `?` prints progress,
    /// `!` prints the full table. The table is exported at end of input.
    Scan(ScanArgs),
}

#[derive(Args)]
pub struct ManifestArgs {
    /// Manifest file (.csv, .tsv or .txt).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// 1-based row holding the column names.
    #[arg(long = "header-row", default_value_t = 1)]
    pub header_row: usize,
}

#[derive(Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Number of data rows to preview.
    #[arg(long = "preview", default_value_t = 5)]
    pub preview: usize,
}

#[derive(Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// 1-based row of the first sample (default: the row after the header).
    #[arg(long = "data-start-row")]
    pub data_start_row: Option<usize>,

    /// Column holding the sample identifiers.
    #[arg(long = "sample-column", value_name = "NAME")]
    pub sample_column: String,

    /// Column holding the QAQC classification.
    #[arg(long = "qaqc-column", value_name = "NAME")]
    pub qaqc_column: Option<String>,

    /// Column holding the CRM classification.
    #[arg(long = "crm-column", value_name = "NAME")]
    pub crm_column: Option<String>,

    /// Shipment number stamped on every sample.
    #[arg(long = "shipment", value_name = "NUMBER")]
    pub shipment: String,

    /// Operator recorded on every scan.
    #[arg(long = "operator", value_name = "NAME")]
    pub operator: Option<String>,

    /// Only accept purely numeric sample identifiers.
    #[arg(long = "numeric-only")]
    pub numeric_only: bool,

    /// Refuse manifests with repeated sample identifiers.
    #[arg(long = "reject-duplicates")]
    pub reject_duplicates: bool,

    /// Export path (default: scanned_<FILE> next to the manifest).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Export tab-separated (default: the manifest's own delimiter).
    #[arg(long = "tsv", conflicts_with = "csv")]
    pub tsv: bool,

    /// Export comma-separated (default: the manifest's own delimiter).
    #[arg(long = "csv")]
    pub csv: bool,

    /// Print one JSON object per result instead of tables.
    #[arg(long = "json")]
    pub json: bool,
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
