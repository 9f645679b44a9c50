//! Extraction statistics and result structures
//!
//! One [`ExtractResult`] per input file: the observations that survived the
//! pipeline plus counters describing what was seen and skipped.

use serde::{Deserialize, Serialize};

use crate::app::models::Observation;

/// Extraction result for a single file
#[derive(Debug, Clone)]
pub struct ExtractResult {
    /// Observations that passed every pipeline stage
    pub observations: Vec<Observation>,

    /// Extraction statistics for this file
    pub stats: ExtractStats,
}

/// Per-file extraction statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractStats {
    /// Body rows examined below the header row
    pub rows_examined: usize,

    /// Observations successfully extracted
    pub observations_extracted: usize,

    /// Accepted data rows skipped due to lookup or parse failures
    pub rows_skipped: usize,

    /// True when a structural problem skipped the whole file
    pub file_skipped: bool,

    /// Diagnostics collected for this file
    pub errors: Vec<String>,
}

impl ExtractStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file-level skip with its diagnostic
    pub fn skip_file(&mut self, reason: impl Into<String>) {
        self.file_skipped = true;
        self.errors.push(reason.into());
    }

    /// Record a row-level skip with its diagnostic
    pub fn skip_row(&mut self, reason: impl Into<String>) {
        self.rows_skipped += 1;
        self.errors.push(reason.into());
    }
}
