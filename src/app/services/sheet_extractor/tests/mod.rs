//! Tests for the sheet extractor components

pub mod columns_tests;
pub mod values_tests;

use std::sync::Arc;

use crate::app::models::{Cell, SheetGrid};
use crate::app::services::code_resolver::{CodeResolver, LookupBackend, TableLookup};

/// Resolver over a fixed mapping table covering the test fixtures
pub fn test_resolver() -> Arc<CodeResolver> {
    Arc::new(CodeResolver::new(LookupBackend::Table(
        TableLookup::from_pairs(
            [("Escherichia coli".to_string(), "B_ESCHR_COLI".to_string())],
            [
                ("Cefepim".to_string(), "FEP".to_string()),
                ("Meropenem".to_string(), "MEM".to_string()),
                ("Ampicillin".to_string(), "AMP".to_string()),
            ],
        ),
    )))
}

/// A well-formed report grid: leading filler, marker row, results table
/// with a section sub-header and indented data rows
pub fn sample_grid() -> SheetGrid {
    SheetGrid::from_rows(vec![
        vec![Cell::text("Resistenzbericht 2023")],
        vec![],
        vec![
            Cell::text("Erreger:"),
            Cell::Empty,
            Cell::text(" Escherichia coli "),
        ],
        vec![
            Cell::text("Antibiotikum"),
            Cell::text("N"),
            Cell::text("S %"),
            Cell::text("R %"),
        ],
        vec![Cell::text("Betalaktame")],
        vec![
            Cell::text("    Cefepim (Non-meningitis)"),
            Cell::Number(120.0),
            Cell::text("91,6"),
            Cell::text("8,4"),
        ],
        vec![
            Cell::text("    Meropenem"),
            Cell::text("1.204"),
            Cell::text("99,5"),
            Cell::text("0,5"),
        ],
    ])
}
