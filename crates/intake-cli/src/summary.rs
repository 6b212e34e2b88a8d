use std::io::{self, Write};
use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use intake_cli::session::SessionEvent;
use intake_model::{
    ConfigureSummary, RegistryStats, SampleRecord, SampleSummary, ScanLogEntry, ScanOutcome,
    ScanStatus,
};

use crate::commands::{ColumnsReport, ScanReport};

pub fn print_columns(report: &ColumnsReport) {
    println!("Manifest: {}", report.filename);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Column"),
        header_cell("Suggested role"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, column) in report.columns.iter().enumerate() {
        let role = if report.sample.as_ref() == Some(column) {
            Some("sample")
        } else if report.qaqc.as_ref() == Some(column) {
            Some("qaqc")
        } else if report.crm.as_ref() == Some(column) {
            Some("crm")
        } else {
            None
        };
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(column),
            match role {
                Some(role) => Cell::new(role).fg(Color::Green).add_attribute(Attribute::Bold),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");

    if !report.preview.is_empty() {
        let mut preview = Table::new();
        preview.set_header(report.columns.iter().map(|c| header_cell(c)));
        apply_table_style(&mut preview);
        for row in &report.preview.rows {
            preview.add_row(row.iter().map(Cell::new));
        }
        println!("Preview:");
        println!("{preview}");
    }
}

pub fn print_configured(
    out: &mut impl Write,
    filename: &str,
    summary: &ConfigureSummary,
) -> io::Result<()> {
    writeln!(out, "Manifest: {filename}")?;
    writeln!(
        out,
        "Samples: {} ({} already scanned)",
        summary.total, summary.stats.scanned
    )?;
    if summary.dropped_rows > 0 {
        writeln!(out, "Rows without sample id: {}", summary.dropped_rows)?;
    }
    if !summary.duplicate_ids.is_empty() {
        writeln!(
            out,
            "Repeated sample ids (first match is used): {}",
            summary.duplicate_ids.join(", ")
        )?;
    }
    write_next(out, summary.next_sample.as_ref())
}

pub fn print_event(out: &mut impl Write, event: &SessionEvent) -> io::Result<()> {
    match event {
        SessionEvent::Scan(outcome) => print_outcome(out, outcome),
        SessionEvent::Skip(result) => {
            writeln!(
                out,
                "Skipped {} sample(s) before {}  {}",
                result.skipped,
                result.target,
                progress(&result.stats)
            )?;
            write_next(out, result.next_sample.as_ref())
        }
        SessionEvent::SkipTargetMissing { target } => {
            writeln!(out, "NOT FOUND  {target} is not in the manifest; nothing skipped")
        }
        SessionEvent::Status {
            stats,
            next_sample,
            recent,
        } => {
            writeln!(out, "{}", progress(stats))?;
            write_next(out, next_sample.as_ref())?;
            if !recent.is_empty() {
                writeln!(out, "{}", recent_table(recent))?;
            }
            Ok(())
        }
        SessionEvent::Snapshot { columns, records } => {
            writeln!(out, "{}", snapshot_table(columns, records))
        }
    }
}

pub fn print_finished(report: &ScanReport) {
    println!("Exported: {}", report.export_path.display());
    println!("{}", progress(&report.stats));
}

fn print_outcome(out: &mut impl Write, outcome: &ScanOutcome) -> io::Result<()> {
    match outcome {
        ScanOutcome::Success {
            record,
            stats,
            qaqc_type,
            crm_type,
            ..
        } => writeln!(
            out,
            "OK         {}  {}{}  {}",
            record.sample_id(),
            qaqc_type,
            crm_suffix(crm_type),
            progress(stats)
        )?,
        ScanOutcome::DuplicateRejected {
            sample_id,
            scan_date,
            scan_time,
            scanned_by,
            ..
        } => writeln!(
            out,
            "DUPLICATE  {sample_id}  already scanned {} {} by {}",
            scan_date.or_display("?"),
            scan_time.or_display("?"),
            scanned_by.or_display("-")
        )?,
        ScanOutcome::NotFound { barcode, .. } => {
            writeln!(out, "NOT FOUND  {barcode}")?;
        }
    }
    write_next(out, outcome.next_sample())
}

fn write_next(out: &mut impl Write, next: Option<&SampleSummary>) -> io::Result<()> {
    match next {
        Some(next) => writeln!(
            out,
            "Next: {}  {}{}",
            next.sample_id,
            next.qaqc_type,
            crm_suffix(&next.crm_type)
        ),
        None => writeln!(out, "Next: all samples scanned"),
    }
}

fn crm_suffix(crm: &str) -> String {
    if crm.is_empty() {
        String::new()
    } else {
        format!(" / {crm}")
    }
}

fn progress(stats: &RegistryStats) -> String {
    format!(
        "[{}/{} scanned, {} missing, {:.1}%]",
        stats.scanned,
        stats.total,
        stats.missing,
        stats.progress() * 100.0
    )
}

fn recent_table(entries: &[ScanLogEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Time"),
        header_cell("Sample"),
        header_cell("Status"),
        header_cell("QAQC"),
    ]);
    apply_table_style(&mut table);
    for entry in entries {
        table.add_row(vec![
            dim_cell(&entry.time),
            Cell::new(&entry.sample_id),
            status_cell(entry.status),
            Cell::new(entry.qaqc_type.as_deref().unwrap_or("-")),
        ]);
    }
    table
}

fn snapshot_table(columns: &[String], records: &[SampleRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(columns.iter().map(|c| header_cell(c)));
    apply_table_style(&mut table);
    for record in records {
        table.add_row(columns.iter().map(|column| {
            let text = record.cell(column).unwrap_or_default();
            let cell = Cell::new(&*text);
            if record.is_scanned() {
                cell
            } else {
                cell.fg(Color::Yellow)
            }
        }));
    }
    table
}

fn status_cell(status: ScanStatus) -> Cell {
    match status {
        ScanStatus::Success => Cell::new("ok").fg(Color::Green),
        ScanStatus::Duplicate => Cell::new("duplicate")
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        ScanStatus::NotFound => Cell::new("not found")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

pub fn print_session_hint(input: &Path) {
    println!(
        "Reading barcodes for {} from stdin (>ID skip, ? status, ! table)",
        input.display()
    );
}
