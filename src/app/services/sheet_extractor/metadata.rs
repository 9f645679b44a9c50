//! Organism metadata row location
//!
//! Each report carries exactly one organism, announced on a metadata row
//! whose first cell is the literal marker `Erreger:` and whose third cell
//! holds the organism name.

use crate::app::models::SheetGrid;
use crate::constants::{ORGANISM_MARKER, ORGANISM_NAME_COLUMN};

/// Find the organism name on the first marker row of the grid
///
/// Returns `None` when no marker row exists or the name cell on that row is
/// empty after trimming. Scanning stops at the first marker row; a second
/// marker further down is ignored.
pub fn find_organism_name(grid: &SheetGrid) -> Option<String> {
    for (row_index, _) in grid.rows() {
        let first = grid.cell(row_index, 0);
        if first.as_text() != Some(ORGANISM_MARKER) {
            continue;
        }

        let name = grid
            .cell(row_index, ORGANISM_NAME_COLUMN)
            .display_value()
            .trim()
            .to_string();
        return if name.is_empty() { None } else { Some(name) };
    }
    None
}
