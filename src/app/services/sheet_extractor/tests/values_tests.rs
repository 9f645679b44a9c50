//! Tests for locale-aware numeric field parsing

use crate::Error;
use crate::app::models::Cell;
use crate::app::services::sheet_extractor::values::{
    parse_isolate_count, parse_resistance_value,
};

#[test]
fn test_numeric_cell_passes_through() {
    assert_eq!(parse_resistance_value(&Cell::Number(8.4)).unwrap(), 8.4);
    assert_eq!(parse_resistance_value(&Cell::Number(0.0)).unwrap(), 0.0);
}

#[test]
fn test_decimal_comma() {
    assert_eq!(parse_resistance_value(&Cell::text("8,4")).unwrap(), 8.4);
    assert_eq!(parse_resistance_value(&Cell::text(" 12,0 ")).unwrap(), 12.0);
}

#[test]
fn test_decimal_point_still_accepted() {
    assert_eq!(parse_resistance_value(&Cell::text("12.5")).unwrap(), 12.5);
}

#[test]
fn test_range_collapses_to_mean() {
    assert_eq!(parse_resistance_value(&Cell::text("8-10")).unwrap(), 9.0);
    assert_eq!(parse_resistance_value(&Cell::text("7,5-8,5")).unwrap(), 8.0);
    assert_eq!(parse_resistance_value(&Cell::text(" 0-100 ")).unwrap(), 50.0);
}

#[test]
fn test_leading_minus_is_not_a_range() {
    assert_eq!(parse_resistance_value(&Cell::text("-5")).unwrap(), -5.0);
    assert_eq!(parse_resistance_value(&Cell::text("-5,5")).unwrap(), -5.5);
}

#[test]
fn test_malformed_ranges_rejected() {
    // Trailing dash, more than two parts, non-numeric bound
    assert!(parse_resistance_value(&Cell::text("3-")).is_err());
    assert!(parse_resistance_value(&Cell::text("8-10-12")).is_err());
    assert!(parse_resistance_value(&Cell::text("a-b")).is_err());
}

#[test]
fn test_parse_error_preserves_raw_value() {
    let error = parse_resistance_value(&Cell::text("n/a")).unwrap_err();
    match error {
        Error::ValueParse { value, .. } => assert_eq!(value, "n/a"),
        other => panic!("expected ValueParse, got {:?}", other),
    }
}

#[test]
fn test_empty_cell_rejected() {
    assert!(parse_resistance_value(&Cell::Empty).is_err());
}

#[test]
fn test_isolate_count_from_number() {
    assert_eq!(parse_isolate_count(&Cell::Number(120.0)).unwrap(), 120);
}

#[test]
fn test_isolate_count_strips_thousands_grouping() {
    assert_eq!(parse_isolate_count(&Cell::text("1.204")).unwrap(), 1204);
    assert_eq!(parse_isolate_count(&Cell::text("12.345.678")).unwrap(), 12_345_678);
}

#[test]
fn test_isolate_count_trims_whitespace() {
    assert_eq!(parse_isolate_count(&Cell::text(" 56 ")).unwrap(), 56);
}

#[test]
fn test_isolate_count_rejects_non_counts() {
    assert!(parse_isolate_count(&Cell::text("-3")).is_err());
    assert!(parse_isolate_count(&Cell::text("12,5")).is_err());
    assert!(parse_isolate_count(&Cell::text("many")).is_err());
    assert!(parse_isolate_count(&Cell::Empty).is_err());
}
