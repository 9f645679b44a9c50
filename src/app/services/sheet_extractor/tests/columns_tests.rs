//! Tests for results header location and column mapping

use super::sample_grid;
use crate::app::models::{Cell, SheetGrid};
use crate::app::services::sheet_extractor::columns::{ColumnMap, find_results_header};

#[test]
fn test_header_located_among_metadata_rows() {
    assert_eq!(find_results_header(&sample_grid()), Some(3));
}

#[test]
fn test_all_three_labels_required() {
    // "S %" missing: the row is not a results header
    let grid = SheetGrid::from_rows(vec![vec![
        Cell::text("Antibiotikum"),
        Cell::text("N"),
        Cell::text("R %"),
    ]]);
    assert_eq!(find_results_header(&grid), None);
}

#[test]
fn test_labels_match_exactly() {
    // Trailing whitespace makes a label a different cell value
    let grid = SheetGrid::from_rows(vec![vec![
        Cell::text("N "),
        Cell::text("S %"),
        Cell::text("R %"),
    ]]);
    assert_eq!(find_results_header(&grid), None);
}

#[test]
fn test_label_positions_are_free() {
    let grid = SheetGrid::from_rows(vec![vec![
        Cell::text("R %"),
        Cell::text("irrelevant"),
        Cell::text("S %"),
        Cell::Empty,
        Cell::text("N"),
    ]]);
    let header_row = find_results_header(&grid).unwrap();
    let columns = ColumnMap::build(&grid, header_row).unwrap();

    assert_eq!(columns.header_row, 0);
    assert_eq!(columns.antibiotic, 0);
    assert_eq!(columns.n_isolates, 4);
    assert_eq!(columns.resistance_pct, 0);
    assert_eq!(columns.column("S %"), Some(2));
    assert_eq!(columns.column("irrelevant"), Some(1));
    assert_eq!(columns.column("missing"), None);
}

#[test]
fn test_duplicate_label_last_occurrence_wins() {
    let grid = SheetGrid::from_rows(vec![vec![
        Cell::text("N"),
        Cell::text("S %"),
        Cell::text("R %"),
        Cell::text("N"),
    ]]);
    let columns = ColumnMap::build(&grid, 0).unwrap();
    assert_eq!(columns.n_isolates, 3);
}

#[test]
fn test_build_requires_n_and_r_columns() {
    let grid = SheetGrid::from_rows(vec![vec![Cell::text("S %"), Cell::text("R %")]]);
    assert!(ColumnMap::build(&grid, 0).is_none());

    let grid = SheetGrid::from_rows(vec![vec![Cell::text("N"), Cell::text("S %")]]);
    assert!(ColumnMap::build(&grid, 0).is_none());

    // Out-of-range header row
    assert!(ColumnMap::build(&grid, 9).is_none());
}
