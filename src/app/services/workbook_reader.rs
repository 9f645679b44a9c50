//! Spreadsheet decoding into the uniform cell grid
//!
//! Thin wrapper around calamine that opens a workbook, takes its first
//! worksheet, and reduces the heterogeneous cell values to [`Cell`]. All
//! format-specific concerns stay behind this boundary; the extraction
//! pipeline only ever sees a [`SheetGrid`].

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::debug;

use crate::app::models::{Cell, SheetGrid};
use crate::{Error, Result};

/// Decode the first worksheet of a spreadsheet file into a grid
pub fn read_grid(path: &Path) -> Result<SheetGrid> {
    let file = path.display().to_string();

    let mut workbook =
        open_workbook_auto(path).map_err(|e| Error::decode(&file, e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::decode(&file, "workbook contains no worksheets"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::decode(&file, e.to_string()))?;

    debug!(
        "Decoded sheet '{}' from {}: {} rows x {} columns",
        sheet_name,
        file,
        range.height(),
        range.width()
    );

    Ok(grid_from_range(&range))
}

/// Convert a calamine range to a grid with absolute sheet coordinates
///
/// Calamine ranges start at the first used cell, so rows and columns before
/// the range start are padded with empty cells to keep the marker and
/// antibiotic columns at their absolute indices.
fn grid_from_range(range: &Range<Data>) -> SheetGrid {
    let (row_offset, column_offset) = range
        .start()
        .map(|(row, column)| (row as usize, column as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset];
    for source_row in range.rows() {
        let mut cells = vec![Cell::Empty; column_offset];
        cells.extend(source_row.iter().map(Cell::from));
        rows.push(cells);
    }

    SheetGrid::from_rows(rows)
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(value) => Cell::Text(value.clone()),
            Data::Float(value) => Cell::Number(*value),
            Data::Int(value) => Cell::Number(*value as f64),
            Data::Bool(value) => Cell::Text(value.to_string()),
            Data::DateTime(value) => Cell::Number(value.as_f64()),
            Data::DateTimeIso(value) => Cell::Text(value.clone()),
            Data::DurationIso(value) => Cell::Text(value.clone()),
            // Formula error markers carry no usable value
            Data::Error(_) => Cell::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_conversion() {
        assert_eq!(Cell::from(&Data::Empty), Cell::Empty);
        assert_eq!(Cell::from(&Data::String("N".into())), Cell::text("N"));
        assert_eq!(Cell::from(&Data::Float(8.4)), Cell::Number(8.4));
        assert_eq!(Cell::from(&Data::Int(14)), Cell::Number(14.0));
        assert_eq!(Cell::from(&Data::Bool(true)), Cell::text("true"));
    }

    #[test]
    fn test_grid_from_range_pads_to_absolute_coordinates() {
        // A range whose first used cell is B3 must still expose it at (2, 1).
        let mut range = Range::new((2, 1), (2, 2));
        range.set_value((2, 1), Data::String("Erreger:".into()));
        range.set_value((2, 2), Data::String("E. coli".into()));

        let grid = grid_from_range(&range);
        assert!(grid.cell(2, 0).is_empty());
        assert_eq!(grid.cell(2, 1), &Cell::text("Erreger:"));
        assert_eq!(grid.cell(2, 2), &Cell::text("E. coli"));
    }

    #[test]
    fn test_read_grid_missing_file() {
        let result = read_grid(Path::new("/nonexistent/report.xlsx"));
        assert!(matches!(result, Err(Error::Decode { .. })));
    }
}
