//! Results header location and column mapping
//!
//! The results table announces itself with a header row containing the
//! labels `N`, `S %`, and `R %` somewhere below the metadata rows. Label
//! positions vary between reports, so the header row is mapped dynamically;
//! only the antibiotic-name column is fixed at column 0 by the layout
//! contract.

use std::collections::HashMap;

use crate::app::models::SheetGrid;
use crate::constants::{
    ANTIBIOTIC_NAME_COLUMN, HEADER_LABEL_N, HEADER_LABEL_R_PCT, HEADER_LABEL_S_PCT,
};

/// Column layout of one results table
#[derive(Debug, Clone)]
pub struct ColumnMap {
    /// Absolute row index of the header row
    pub header_row: usize,
    /// Column of the antibiotic name, fixed by the layout contract
    pub antibiotic: usize,
    /// Column of the isolate count
    pub n_isolates: usize,
    /// Column of the resistant percentage
    pub resistance_pct: usize,
    /// Every header label with its column index
    labels: HashMap<String, usize>,
}

impl ColumnMap {
    /// Build the column map from a located header row
    ///
    /// Maps every non-empty cell of the row to its column index; on label
    /// collision the last occurrence wins. Returns `None` if the required
    /// labels `N` or `R %` do not map to a column.
    pub fn build(grid: &SheetGrid, header_row: usize) -> Option<Self> {
        let (_, cells) = grid.rows().nth(header_row)?;

        let mut labels = HashMap::new();
        for (column, cell) in cells.iter().enumerate() {
            if !cell.is_empty() {
                labels.insert(cell.display_value(), column);
            }
        }

        let n_isolates = labels.get(HEADER_LABEL_N).copied()?;
        let resistance_pct = labels.get(HEADER_LABEL_R_PCT).copied()?;

        Some(Self {
            header_row,
            antibiotic: ANTIBIOTIC_NAME_COLUMN,
            n_isolates,
            resistance_pct,
            labels,
        })
    }

    /// Column index of an arbitrary header label
    pub fn column(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }
}

/// Find the first row containing all three results-table header labels
///
/// Labels must appear as exact text cell values; column positions do not
/// matter.
pub fn find_results_header(grid: &SheetGrid) -> Option<usize> {
    const REQUIRED: [&str; 3] = [HEADER_LABEL_N, HEADER_LABEL_S_PCT, HEADER_LABEL_R_PCT];

    grid.rows()
        .find(|(_, cells)| {
            REQUIRED
                .iter()
                .all(|label| cells.iter().any(|cell| cell.as_text() == Some(*label)))
        })
        .map(|(row_index, _)| row_index)
}
