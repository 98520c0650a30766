use lalin_reporter::export::to_csv;
use lalin_reporter::records::LalinRecord;
use lalin_reporter::report;

fn sample_day() -> Vec<LalinRecord> {
    let json = include_str!("fixtures/sample_day.json");
    serde_json::from_str(json).expect("Failed to parse fixture")
}

#[test]
fn test_full_pipeline() {
    let records = sample_day();
    assert_eq!(records.len(), 6);

    let summary = report::dashboard_summary(&records);
    let totals = report::payment_totals(&records);

    // every grouping partitions the same grand total
    let by_gerbang: u64 = summary.gerbangs.iter().map(|e| e.value).sum();
    let by_ruas: u64 = summary.ruas.iter().map(|e| e.value).sum();
    let by_shift: u64 = summary.shifts.iter().map(|e| e.value).sum();

    assert_eq!(by_gerbang, 488);
    assert_eq!(by_ruas, 488);
    assert_eq!(by_shift, 488);
    assert_eq!(totals.total_keseluruhan, 488);

    assert_eq!(totals.total_tunai, 240);
    assert_eq!(totals.total_e_toll, 230);
    assert_eq!(totals.total_flo, 18);

    // busiest gate first
    assert_eq!(summary.gerbangs[0].label, "Gerbang 1");
    assert_eq!(summary.gerbangs[0].value, 330);

    // all eight channels saw traffic in the fixture
    assert_eq!(summary.payment_methods.len(), 8);
}

#[test]
fn test_pipeline_csv_export() {
    let records = sample_day();
    let csv = to_csv(&records).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 7); // header + 6 rows
    assert!(lines[0].starts_with("ID,ID Cabang,"));

    // record 3 has no booth or origin gate: empty fields, zero channels
    assert_eq!(lines[3], "3,1,2,2024-01-01,2,,1,,0,0,0,0,30,0,0,0,5,0,0,0");
}
