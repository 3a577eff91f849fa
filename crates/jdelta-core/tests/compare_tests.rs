use jdelta_core::{compare, ExpectedShape, ParseError, Side, Tier, Value};

#[test]
fn array_report_bundles_stats_and_diff() {
    let report = compare(
        "[1, 1, 2, 3]",
        "[3, 2, 1]",
        ExpectedShape::Array,
    )
    .unwrap();

    assert_eq!(report.a.tier, Tier::Strict);
    assert_eq!(report.a.len, Some(4));
    assert_eq!(report.a.unique_count, Some(3));
    assert_eq!(report.a.duplicates.len(), 1);
    assert_eq!(report.a.duplicates[0].item, Value::Number(1.0));
    assert_eq!(report.a.duplicates[0].count, 2);

    assert_eq!(report.b.len, Some(3));
    assert_eq!(report.b.duplicates.len(), 0);

    assert_eq!(report.identical, Some(false));
    assert_eq!(report.same_unique_set, Some(true));

    // Bag mode: one extra 1 on side A.
    assert_eq!(report.diff.removed.len(), 1);
    assert!(report.diff.added.is_empty());
    assert_eq!(report.diff.same.len(), 3);
}

#[test]
fn identical_arrays_report_identical() {
    let report = compare("[1, 2]", "[1, 2]", ExpectedShape::Array).unwrap();
    assert_eq!(report.identical, Some(true));
    assert_eq!(report.same_unique_set, Some(true));
    assert!(report.diff.is_unchanged());
}

#[test]
fn object_roots_have_no_array_stats() {
    let report = compare(
        r#"{"x": 1}"#,
        r#"{"x": 2}"#,
        ExpectedShape::ObjectOrArray,
    )
    .unwrap();
    assert_eq!(report.a.len, None);
    assert_eq!(report.a.unique_count, None);
    assert!(report.a.duplicates.is_empty());
    assert_eq!(report.identical, None);
    assert_eq!(report.same_unique_set, None);
    assert_eq!(report.diff.changed.len(), 1);
    assert_eq!(report.diff.changed[0].path, "x");
}

#[test]
fn per_side_tiers_are_reported() {
    let report = compare(
        r#"{"x": 1}"#,
        "{x: 1,}",
        ExpectedShape::ObjectOrArray,
    )
    .unwrap();
    assert_eq!(report.a.tier, Tier::Strict);
    assert_eq!(report.a.normalized, None);
    assert_eq!(report.b.tier, Tier::Normalized);
    assert!(report.b.normalized.is_some());
    assert!(report.diff.is_unchanged());
}

#[test]
fn failure_on_side_a_is_attributed() {
    let err = compare("@@@", "[1]", ExpectedShape::Array).unwrap_err();
    assert_eq!(err.side, Side::A);
    assert!(matches!(err.source, ParseError::Syntax(_)));
}

#[test]
fn failure_on_side_b_is_attributed() {
    let err = compare("[1]", "", ExpectedShape::Array).unwrap_err();
    assert_eq!(err.side, Side::B);
    assert_eq!(err.source, ParseError::EmptyInput);
}

#[test]
fn both_sides_failing_reports_side_a() {
    let err = compare("", "@@@", ExpectedShape::Array).unwrap_err();
    assert_eq!(err.side, Side::A);
}

#[test]
fn shape_violations_abort_the_comparison() {
    let err = compare("[1]", r#"{"x": 1}"#, ExpectedShape::Array).unwrap_err();
    assert_eq!(err.side, Side::B);
    assert_eq!(err.source, ParseError::NotAnArray("object"));
}

#[test]
fn report_serializes_to_json() {
    let report = compare("[1, 1]", "[1]", ExpectedShape::Array).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["a"]["len"], serde_json::json!(2));
    assert_eq!(parsed["a"]["tier"], serde_json::json!("strict"));
    assert!(parsed["diff"]["same"].is_array());
}

#[test]
fn error_messages_name_the_side() {
    let err = compare("", "[1]", ExpectedShape::Array).unwrap_err();
    assert_eq!(err.to_string(), "input A failed to parse: input is empty");
}
