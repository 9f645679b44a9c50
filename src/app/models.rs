//! Data models for AMR aggregation
//!
//! This module contains the core data structures: the decoded spreadsheet
//! grid consumed by the extraction pipeline, and the observation records
//! emitted into the aggregated output.

use serde::{Deserialize, Serialize};

// =============================================================================
// Observation Record
// =============================================================================

/// One resistance measurement for an (organism, antibiotic) pair
///
/// An observation is created only after the organism code resolved for the
/// file, the antibiotic code resolved for the row, and both numeric fields
/// parsed. Field order here fixes the column order of the CSV output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Standardized AMR code for the organism, never empty
    pub organism_id: String,

    /// Standardized AMR code for the antibiotic, never empty
    pub antibiotic_id: String,

    /// Resistant share of tested isolates in percent; [0,100] expected
    /// but not enforced
    pub resistance_pct: f64,

    /// Number of isolates tested
    pub n_isolates: u32,
}

// =============================================================================
// Decoded Spreadsheet Grid
// =============================================================================

/// A single decoded spreadsheet cell
///
/// The decoding collaborator reduces the source file's heterogeneous cell
/// types to the three shapes the extraction pipeline distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// No value present
    Empty,
    /// Textual content, whitespace preserved as decoded
    Text(String),
    /// Numeric content
    Number(f64),
}

impl Cell {
    /// Convenience constructor for text cells
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Check whether the cell holds no value
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Textual content of the cell, if it is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Render the cell the way it would display in the sheet
    ///
    /// Integral numbers render without a fractional part ("14", not "14.0"),
    /// matching the source report's formatting of count columns.
    pub fn display_value(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(value) => value.clone(),
            Cell::Number(value) => format!("{}", value),
        }
    }
}

/// A 2-D grid of decoded cells, indexed by (row, column)
///
/// Produced by the workbook reader and read-only downstream. Positions keep
/// the absolute sheet coordinates; reads outside the decoded area yield
/// [`Cell::Empty`].
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    rows: Vec<Vec<Cell>>,
}

impl SheetGrid {
    /// Build a grid from rows of cells
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Number of rows in the grid
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at (row, column); absent positions read as empty
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(&Cell::Empty)
    }

    /// Iterate rows with their absolute row index
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[Cell])> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, cells)| (index, cells.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display_value() {
        assert_eq!(Cell::Empty.display_value(), "");
        assert_eq!(Cell::text("  Cefepim").display_value(), "  Cefepim");
        assert_eq!(Cell::Number(14.0).display_value(), "14");
        assert_eq!(Cell::Number(8.4).display_value(), "8.4");
    }

    #[test]
    fn test_grid_out_of_bounds_reads_empty() {
        let grid = SheetGrid::from_rows(vec![vec![Cell::text("a")]]);
        assert_eq!(grid.cell(0, 0), &Cell::text("a"));
        assert!(grid.cell(0, 5).is_empty());
        assert!(grid.cell(7, 0).is_empty());
    }

    #[test]
    fn test_grid_rows_keep_absolute_index() {
        let grid = SheetGrid::from_rows(vec![vec![], vec![Cell::Number(1.0)]]);
        let indexed: Vec<usize> = grid.rows().map(|(index, _)| index).collect();
        assert_eq!(indexed, vec![0, 1]);
    }
}
