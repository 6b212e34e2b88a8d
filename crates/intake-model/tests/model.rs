use intake_model::{
    CellValue, RegistryStats, SampleRecord, SampleSummary, ScanOutcome, ScanStamp, ScanStatus,
};

fn next() -> Option<SampleSummary> {
    Some(SampleSummary {
        sample_id: "85991".to_string(),
        qaqc_type: "Normal Sample".to_string(),
        crm_type: String::new(),
    })
}

#[test]
fn scan_outcome_is_tagged_by_status() {
    let outcome = ScanOutcome::NotFound {
        barcode: "99999".to_string(),
        stats: RegistryStats {
            total: 4,
            scanned: 0,
            missing: 4,
        },
        next_sample: next(),
    };
    let json = serde_json::to_value(&outcome).expect("serialize outcome");
    assert_eq!(json["status"], "not_found");
    assert_eq!(json["barcode"], "99999");
    assert_eq!(json["next_sample"]["sample_id"], "85991");
    assert_eq!(outcome.status(), ScanStatus::NotFound);
}

#[test]
fn duplicate_serializes_scan_fields() {
    let mut record = SampleRecord::new("85990", "S-1");
    record.mark_scanned(ScanStamp {
        date: "2024-05-01".to_string(),
        time: "09:15:00".to_string(),
        operator: CellValue::Present("alice".to_string()),
    });
    let outcome = ScanOutcome::DuplicateRejected {
        sample_id: record.sample_id().to_string(),
        scan_date: record.scan_date().clone(),
        scan_time: record.scan_time().clone(),
        scanned_by: record.scanned_by().clone(),
        qaqc_type: record.qaqc_display(),
        crm_type: record.crm_display(),
        stats: RegistryStats::default(),
        next_sample: None,
    };
    let json = serde_json::to_value(&outcome).expect("serialize outcome");
    assert_eq!(json["status"], "duplicate");
    assert_eq!(json["scanned_by"], "alice");
    assert_eq!(json["qaqc_type"], "Normal Sample");
    assert!(json["next_sample"].is_null());
}

#[test]
fn record_round_trips_through_json() {
    let mut record = SampleRecord::new("85993", "S-1");
    record.qaqc_type = CellValue::Present("MG".to_string());
    let json = serde_json::to_string(&record).expect("serialize record");
    let back: SampleRecord = serde_json::from_str(&json).expect("deserialize record");
    assert_eq!(back, record);
    assert!(back.is_pending());
}
