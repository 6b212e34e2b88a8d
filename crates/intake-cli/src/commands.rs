use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use intake_core::ScanStation;
use intake_ingest::{ManifestFormat, ManifestSource, PolarsCsvDecoder, RawTable, TabularDecoder};
use intake_model::{
    ColumnMapping, ConfigureSummary, Configuration, DuplicatePolicy, IdentifierRule,
    RegistryStats,
};
use intake_output::CsvTableEncoder;
use tracing::{info, info_span};

use intake_cli::logging::redact_value;
use intake_cli::session::{Session, SessionEvent};

use crate::cli::{ColumnsArgs, ScanArgs};
use crate::summary::{print_columns, print_configured, print_event};

/// Columns, suggested mapping and preview rows of a manifest.
pub struct ColumnsReport {
    pub filename: String,
    pub columns: Vec<String>,
    pub sample: Option<String>,
    pub qaqc: Option<String>,
    pub crm: Option<String>,
    pub preview: RawTable,
}

/// Result of a finished scanning session.
pub struct ScanReport {
    pub export_path: PathBuf,
    pub stats: RegistryStats,
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let report = inspect_columns(args)?;
    print_columns(&report);
    Ok(())
}

fn inspect_columns(args: &ColumnsArgs) -> Result<ColumnsReport> {
    let (filename, bytes) = read_manifest(&args.manifest.file)?;
    let header_row = args.manifest.header_row;

    let station = ScanStation::new();
    station.load_manifest(&filename, None, bytes.clone())?;
    let (columns, suggestions) = station
        .suggest_columns(header_row)
        .with_context(|| format!("read columns at row {header_row}"))?;

    let source = ManifestSource::new(filename.as_str(), None, bytes)?;
    let preview = PolarsCsvDecoder::new()
        .with_max_rows(args.preview)
        .decode(&source, header_row)?;

    Ok(ColumnsReport {
        filename,
        columns,
        sample: suggestions.sample,
        qaqc: suggestions.qaqc,
        crm: suggestions.crm,
        preview,
    })
}

pub fn run_scan(args: &ScanArgs) -> Result<ScanReport> {
    let (filename, bytes) = read_manifest(&args.manifest.file)?;
    let span = info_span!("session", manifest = %filename);
    let _guard = span.enter();

    let station = ScanStation::new();
    let handle = station.load_manifest(&filename, None, bytes)?;
    let config = build_configuration(args);
    if let Some(operator) = config.operator() {
        info!(operator = redact_value(operator), "operator configured");
    }
    let summary = station.configure(config).context("configure manifest")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    emit_configured(&mut out, &filename, &summary, args.json)?;

    let session = Session::new(&station, "");
    for line in io::stdin().lock().lines() {
        let line = line.context("read stdin")?;
        if let Some(event) = session.handle_line(&line)? {
            emit_event(&mut out, &event, args.json)?;
        }
    }

    let encoder = export_encoder(args, handle.format);
    let export_path = session.finish(&args.manifest.file, args.output.as_deref(), &encoder)?;
    let stats = station.stats()?;
    Ok(ScanReport { export_path, stats })
}

/// Maps scan flags onto a station configuration.
pub fn build_configuration(args: &ScanArgs) -> Configuration {
    let mut mapping = ColumnMapping::new(args.sample_column.as_str());
    if let Some(column) = &args.qaqc_column {
        mapping = mapping.with_qaqc(column.as_str());
    }
    if let Some(column) = &args.crm_column {
        mapping = mapping.with_crm(column.as_str());
    }
    let header_row = args.manifest.header_row;
    let data_start_row = args.data_start_row.unwrap_or(header_row + 1);

    let mut config = Configuration::new(mapping, args.shipment.as_str())
        .with_rows(header_row, data_start_row)
        .with_identifier_rule(if args.numeric_only {
            IdentifierRule::NumericOnly
        } else {
            IdentifierRule::ContainsDigit
        })
        .with_duplicate_policy(if args.reject_duplicates {
            DuplicatePolicy::Reject
        } else {
            DuplicatePolicy::KeepAll
        });
    if let Some(operator) = &args.operator {
        config = config.with_operator(operator.as_str());
    }
    config
}

/// Explicit `--tsv`/`--csv`, otherwise the manifest's own delimiter.
pub fn export_encoder(args: &ScanArgs, format: ManifestFormat) -> CsvTableEncoder {
    if args.tsv {
        CsvTableEncoder::tsv()
    } else if args.csv {
        CsvTableEncoder::new()
    } else {
        match format {
            ManifestFormat::Tsv => CsvTableEncoder::tsv(),
            ManifestFormat::Csv | ManifestFormat::Workbook => CsvTableEncoder::new(),
        }
    }
}

fn read_manifest(path: &Path) -> Result<(String, Vec<u8>)> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok((filename, bytes))
}

fn emit_configured(
    out: &mut impl Write,
    filename: &str,
    summary: &ConfigureSummary,
    json: bool,
) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(summary)?)?;
    } else {
        print_configured(out, filename, summary)?;
    }
    Ok(())
}

fn emit_event(out: &mut impl Write, event: &SessionEvent, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(event)?)?;
    } else {
        print_event(out, event)?;
    }
    out.flush()?;
    Ok(())
}
