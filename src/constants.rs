//! Application constants for the AMR aggregator
//!
//! This module contains the structural contract with the upstream report
//! generator (marker literals, header labels, layout indices) plus default
//! values for the external lookup collaborator.

// =============================================================================
// Sheet Layout Contract
// =============================================================================

/// Literal marker in the first cell of the organism metadata row
pub const ORGANISM_MARKER: &str = "Erreger:";

/// Column holding the organism name on the marker row
pub const ORGANISM_NAME_COLUMN: usize = 2;

/// Header label for the isolate-count column
pub const HEADER_LABEL_N: &str = "N";

/// Header label for the susceptible-percentage column
pub const HEADER_LABEL_S_PCT: &str = "S %";

/// Header label for the resistant-percentage column
pub const HEADER_LABEL_R_PCT: &str = "R %";

/// Column holding the antibiotic name in the results table
pub const ANTIBIOTIC_NAME_COLUMN: usize = 0;

/// Leading indentation that distinguishes an antibiotic data row from a
/// section sub-header row in the source layout
pub const DATA_ROW_INDENT: &str = "    ";

// =============================================================================
// External Lookup Defaults
// =============================================================================

/// Default interpreter for the lookup scripts
pub const DEFAULT_LOOKUP_PROGRAM: &str = "Rscript";

/// Default script resolving organism names to AMR codes
pub const DEFAULT_ORGANISM_SCRIPT: &str = "get_amr_code.R";

/// Default script resolving antibiotic names to AMR codes
pub const DEFAULT_ANTIBIOTIC_SCRIPT: &str = "get_antibiotic_amr_code.R";

/// Default upper bound on a single lookup invocation, in seconds
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Input Discovery
// =============================================================================

/// File extensions accepted when an input argument names a directory
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls", "ods"];
