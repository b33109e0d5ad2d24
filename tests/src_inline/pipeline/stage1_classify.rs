use super::*;

fn records() -> Vec<Record> {
    vec![
        Record::new("S1", "Ada", 3.9),
        Record::new("S2", "Brook", 3.5),
        Record::new("S3", "Cyd", 3.1),
        Record::new("S4", "Dee", 2.4),
    ]
}

fn spec_performance() -> BandTable {
    BandTable::new(
        "performance",
        &[
            ("Excellent", 3.8),
            ("VeryGood", 3.5),
            ("Good", 3.3),
            ("Satisfactory", 3.0),
            ("NeedsImprovement", f64::NEG_INFINITY),
        ],
        "Unranked",
    )
}

#[test]
fn test_boundary_score_gets_upper_band() {
    let out = classify(
        &[Record::new("X", "Xan", 3.5)],
        &spec_performance(),
        InvalidRecordPolicy::FailFast,
    )
    .unwrap();
    assert_eq!(out.labeled[0].label, "VeryGood");
    assert_eq!(out.labeled[0].band_index, 1);
}

#[test]
fn test_every_record_gets_exactly_one_label() {
    let input = records();
    let out = classify(
        &input,
        &BandTable::performance_v1(),
        InvalidRecordPolicy::FailFast,
    )
    .unwrap();
    assert_eq!(out.table, "performance");
    assert_eq!(out.labeled.len(), input.len());
    let labels = out
        .labeled
        .iter()
        .map(|l| l.label.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        labels,
        vec!["Excellent", "Very Good", "Satisfactory", "Needs Improvement"]
    );
    assert_eq!(out.labeled[3].band_index, 4);
    // input order is preserved
    assert_eq!(out.labeled[2].record.id, "S3");
}

#[test]
fn test_invalid_table_fails_before_records() {
    let bad = BandTable::new("broken", &[("Low", 1.0), ("High", 2.0)], "F");
    let err = classify(&records(), &bad, InvalidRecordPolicy::FailFast).unwrap_err();
    assert!(matches!(err, AnalysisError::Configuration { ref table, .. } if table == "broken"));
}

#[test]
fn test_non_finite_score_fails_fast_with_id() {
    let mut input = records();
    input.push(Record::new("S5", "Eli", f64::NAN));
    let err = classify(
        &input,
        &BandTable::letter_grade_v1(),
        InvalidRecordPolicy::FailFast,
    )
    .unwrap_err();
    match err {
        AnalysisError::InvalidRecord { id, .. } => assert_eq!(id, "S5"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_non_finite_score_skipped_and_counted() {
    let mut input = records();
    input.insert(1, Record::new("S5", "Eli", f64::INFINITY));
    input.push(Record::new("S6", "Fay", f64::NEG_INFINITY));
    let out = classify(
        &input,
        &BandTable::letter_grade_v1(),
        InvalidRecordPolicy::Skip,
    )
    .unwrap();
    assert_eq!(out.labeled.len(), 4);
    assert_eq!(out.skipped_count(), 2);
    assert_eq!(out.skipped, vec!["S5".to_string(), "S6".to_string()]);
}

#[test]
fn test_empty_input_is_not_an_error() {
    let out = classify(
        &[],
        &BandTable::performance_v1(),
        InvalidRecordPolicy::FailFast,
    )
    .unwrap();
    assert!(out.labeled.is_empty());
    assert_eq!(out.skipped_count(), 0);
}
