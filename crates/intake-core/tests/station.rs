//! End-to-end behaviour of the scanning station over a decoded manifest.

use std::sync::Arc;

use chrono::NaiveDate;
use intake_core::{FixedClock, ScanStation, StationError};
use intake_ingest::{ManifestFormat, PolarsCsvDecoder};
use intake_model::{
    CellValue, ColumnMapping, Configuration, DuplicatePolicy, RegistryStats, ScanOutcome,
    ScanStatus,
};

const MANIFEST: &str = "\
Lote 42,,
N° Muestra,Tipo QAQC,Desde
85990,,10
85991,DUP,10.5
85992,,11
85993,STD,11.5
";

fn station() -> ScanStation {
    let at = NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(8, 15, 0))
        .expect("valid timestamp");
    ScanStation::with_parts(Box::new(PolarsCsvDecoder::new()), Arc::new(FixedClock(at)))
}

fn config() -> Configuration {
    Configuration::new(ColumnMapping::new("N° Muestra").with_qaqc("Tipo QAQC"), "SH-001")
        .with_rows(2, 3)
}

fn configured_station() -> ScanStation {
    let station = station();
    station
        .load_manifest("lote_42.csv", None, MANIFEST.as_bytes().to_vec())
        .expect("load");
    station.configure(config()).expect("configure");
    station
}

fn stats(total: usize, scanned: usize) -> RegistryStats {
    RegistryStats {
        total,
        scanned,
        missing: total - scanned,
    }
}

#[test]
fn configure_reports_total_and_first_sample() {
    let station = station();
    station
        .load_manifest("lote_42.csv", None, MANIFEST.as_bytes().to_vec())
        .expect("load");
    let summary = station.configure(config()).expect("configure");
    assert_eq!(summary.total, 4);
    assert_eq!(summary.stats, stats(4, 0));
    assert_eq!(summary.next_sample.expect("next").sample_id, "85990");
    assert_eq!(summary.dropped_rows, 0);
}

#[test]
fn scan_success_updates_stats_and_next_sample() {
    let station = configured_station();
    let outcome = station.scan("85990", "alice").expect("scan");
    let ScanOutcome::Success {
        record,
        stats: after,
        qaqc_type,
        crm_type,
        next_sample,
    } = outcome
    else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(after, stats(4, 1));
    assert_eq!(qaqc_type, "Normal Sample");
    assert_eq!(crm_type, "");
    assert_eq!(record.scanned_by(), &CellValue::Present("alice".to_string()));
    assert_eq!(record.scan_date().as_str(), Some("2024-05-01"));
    assert_eq!(record.shipment_number, "SH-001");
    assert_eq!(next_sample.expect("next").sample_id, "85991");
}

#[test]
fn unknown_barcode_is_not_found_and_changes_nothing() {
    let station = configured_station();
    let before = station.snapshot().expect("snapshot");
    let outcome = station.scan("99999", "alice").expect("scan");
    assert_eq!(outcome.status(), ScanStatus::NotFound);
    assert_eq!(outcome.stats(), stats(4, 0));
    assert_eq!(outcome.next_sample().expect("next").sample_id, "85990");
    assert_eq!(station.snapshot().expect("snapshot"), before);
}

#[test]
fn duplicate_scan_keeps_first_stamp() {
    let station = configured_station();
    station.scan("85991", "alice").expect("first scan");
    let after_first = station.snapshot().expect("snapshot");

    let outcome = station.scan("85991", "bob").expect("second scan");
    let ScanOutcome::DuplicateRejected {
        scanned_by,
        scan_date,
        qaqc_type,
        stats: current,
        ..
    } = outcome
    else {
        panic!("expected duplicate, got {outcome:?}");
    };
    assert_eq!(scanned_by.as_str(), Some("alice"));
    assert_eq!(scan_date.as_str(), Some("2024-05-01"));
    assert_eq!(qaqc_type, "DUP");
    assert_eq!(current, stats(4, 1));
    assert_eq!(station.snapshot().expect("snapshot"), after_first);
}

#[test]
fn skip_ahead_marks_prefix_as_omitted() {
    let station = configured_station();
    let result = station.set_start_index("85992").expect("skip");
    assert_eq!(result.skipped, 2);
    assert_eq!(result.stats, stats(4, 2));
    assert_eq!(result.next_sample.expect("next").sample_id, "85992");

    let records = station.snapshot().expect("snapshot");
    for record in &records[..2] {
        assert!(record.is_scanned());
        assert_eq!(record.scanned_by().as_str(), Some("OMITIDO"));
    }
    assert!(records[2..].iter().all(|record| record.is_pending()));
}

#[test]
fn skip_ahead_is_idempotent() {
    let station = configured_station();
    station.set_start_index("85992").expect("first skip");
    let again = station.set_start_index("85992").expect("second skip");
    assert_eq!(again.skipped, 0);
    assert_eq!(again.next_sample.expect("next").sample_id, "85992");
}

#[test]
fn skip_to_first_pending_changes_nothing() {
    let station = configured_station();
    station.scan("85990", "alice").expect("scan");
    let before = station.snapshot().expect("snapshot");
    let result = station.set_start_index("85991").expect("skip");
    assert_eq!(result.skipped, 0);
    assert_eq!(result.next_sample.expect("next").sample_id, "85991");
    assert_eq!(station.snapshot().expect("snapshot"), before);
}

#[test]
fn skip_to_unknown_target_fails() {
    let station = configured_station();
    let err = station.set_start_index("12345").unwrap_err();
    assert!(matches!(err, StationError::NotFound { ref sample_id } if sample_id == "12345"));
    assert_eq!(station.stats().expect("stats"), stats(4, 0));
}

#[test]
fn operations_before_configure_are_rejected() {
    let station = station();
    assert!(matches!(
        station.scan("85990", "alice"),
        Err(StationError::StateUnconfigured { .. })
    ));
    assert!(matches!(
        station.export_table(),
        Err(StationError::StateUnconfigured { .. })
    ));
    assert!(matches!(
        station.configure(config()),
        Err(StationError::NoManifest)
    ));
}

#[test]
fn missing_column_leaves_previous_table() {
    let station = configured_station();
    station.scan("85990", "alice").expect("scan");
    let bad = Configuration::new(ColumnMapping::new("Muestra"), "SH-002").with_rows(2, 3);
    let err = station.configure(bad).unwrap_err();
    let StationError::ColumnNotFound { column, available } = err else {
        panic!("expected ColumnNotFound");
    };
    assert_eq!(column, "Muestra");
    assert!(available.contains(&"N° Muestra".to_string()));
    assert_eq!(station.stats().expect("stats"), stats(4, 1));
}

#[test]
fn reject_policy_fails_on_repeated_identifiers() {
    let station = station();
    let manifest = "Sample\n1\n2\n1\n";
    station
        .load_manifest("m.csv", None, manifest.as_bytes().to_vec())
        .expect("load");
    let config = Configuration::new(ColumnMapping::new("Sample"), "S")
        .with_duplicate_policy(DuplicatePolicy::Reject);
    let err = station.configure(config).unwrap_err();
    assert!(matches!(err, StationError::DuplicateIdentifiers { ref ids } if ids == &["1"]));
    assert!(!station.is_configured());
}

#[test]
fn leading_blank_lines_shift_the_header_row() {
    let station = ScanStation::new();
    let handle = station
        .load_manifest("lote.tsv", None, b"\nSample\tX\n85990\ta\n".to_vec())
        .expect("load");
    assert_eq!(handle.format, ManifestFormat::Tsv);
    assert_eq!(station.peek_columns(2).expect("columns"), vec!["Sample", "X"]);

    let config = Configuration::new(ColumnMapping::new("Sample"), "SH-1").with_rows(2, 3);
    let summary = station.configure(config).expect("configure");
    assert_eq!(summary.total, 1);
}

#[test]
fn loading_a_new_manifest_clears_the_table() {
    let station = configured_station();
    let handle = station
        .load_manifest("other.csv", None, b"Sample\n7\n".to_vec())
        .expect("load");
    assert_eq!(handle.filename, "other.csv");
    assert_eq!(handle.format, ManifestFormat::Csv);
    assert_eq!(handle.fingerprint.len(), 64);
    assert!(!station.is_configured());
}

#[test]
fn peek_columns_normalizes_names() {
    let station = station();
    station
        .load_manifest("m.csv", None, b"\"N\xC2\xB0\nMuestra\", Desde \n1,2\n".to_vec())
        .expect("load");
    assert_eq!(
        station.peek_columns(1).expect("columns"),
        vec!["N° Muestra".to_string(), "Desde".to_string()]
    );
}

#[test]
fn export_carries_source_filename_and_order() {
    let station = configured_station();
    station.scan("85992", "alice").expect("scan");
    let export = station.export_table().expect("export");
    assert_eq!(export.source_filename, "lote_42.csv");
    let ids: Vec<&str> = export
        .table
        .records()
        .iter()
        .map(|record| record.sample_id())
        .collect();
    assert_eq!(ids, ["85990", "85991", "85992", "85993"]);
    assert!(export.table.records()[2].is_scanned());
}

#[test]
fn reset_returns_to_empty_state() {
    let station = configured_station();
    station.scan("85990", "alice").expect("scan");
    station.reset();
    assert!(!station.is_configured());
    assert!(matches!(station.stats(), Err(StationError::StateUnconfigured { .. })));
    assert!(matches!(station.peek_columns(1), Err(StationError::NoManifest)));
}

#[test]
fn recent_scans_are_newest_first() {
    let station = configured_station();
    station.scan("85990", "alice").expect("scan");
    station.scan("nope", "alice").expect("scan");
    let log = station.recent_scans().expect("log");
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].status, ScanStatus::NotFound);
    assert_eq!(log[1].sample_id, "85990");
    assert_eq!(log[1].qaqc_type.as_deref(), Some("Normal Sample"));
}

#[test]
fn concurrent_scans_of_one_barcode_succeed_once() {
    let station = configured_station();
    let outcomes: Vec<ScanOutcome> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let station = &station;
                scope.spawn(move || {
                    station
                        .scan("85993", &format!("worker-{worker}"))
                        .expect("scan")
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("join"))
            .collect()
    });

    let successes = outcomes.iter().filter(|o| o.is_success()).count();
    let duplicates = outcomes
        .iter()
        .filter(|o| o.status() == ScanStatus::Duplicate)
        .count();
    assert_eq!(successes, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(station.stats().expect("stats"), stats(4, 1));
}

#[test]
fn concurrent_scans_of_distinct_barcodes_all_count() {
    let station = configured_station();
    std::thread::scope(|scope| {
        for id in ["85990", "85991", "85992", "85993"] {
            let station = &station;
            scope.spawn(move || station.scan(id, "alice").expect("scan"));
        }
    });
    let current = station.stats().expect("stats");
    assert_eq!(current, stats(4, 4));
    assert!(current.is_complete());
    assert_eq!(station.next_sample().expect("next"), None);
}
