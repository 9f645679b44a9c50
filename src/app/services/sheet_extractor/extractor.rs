//! Extraction orchestration for one report grid
//!
//! Drives the per-file pipeline: locate the organism, resolve its code,
//! locate and map the results header, then walk the body rows. Stages one
//! through four skip the whole file on failure; the body-row walk only ever
//! skips individual rows. `extract` itself never fails, so one malformed
//! report cannot abort a batch.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::columns::{ColumnMap, find_results_header};
use super::metadata::find_organism_name;
use super::stats::{ExtractResult, ExtractStats};
use super::values::{parse_isolate_count, parse_resistance_value};
use crate::app::models::{Observation, SheetGrid};
use crate::app::services::code_resolver::{CodeResolver, NameKind};
use crate::constants::DATA_ROW_INDENT;

/// Sheet extractor for AMR resistance report grids
#[derive(Debug)]
pub struct SheetExtractor {
    resolver: Arc<CodeResolver>,
}

impl SheetExtractor {
    /// Create a new extractor with its code-resolver dependency
    pub fn new(resolver: Arc<CodeResolver>) -> Self {
        Self { resolver }
    }

    /// Extract every observation from one decoded grid
    ///
    /// `source` labels diagnostics only; the grid is already decoded. A
    /// structural failure returns an empty result with `file_skipped` set.
    pub async fn extract(&self, grid: &SheetGrid, source: &str) -> ExtractResult {
        let mut stats = ExtractStats::new();
        let mut observations = Vec::new();

        info!("Processing {}", source);

        // Stage 1: organism metadata row
        let Some(organism_name) = find_organism_name(grid) else {
            warn!("Could not find organism name in {}", source);
            stats.skip_file(format!("{}: no organism metadata row", source));
            return ExtractResult {
                observations,
                stats,
            };
        };

        // Stage 2: organism code resolution
        let Some(organism_id) = self
            .resolver
            .resolve(&organism_name, NameKind::Organism)
            .await
        else {
            warn!(
                "Skipping {} due to missing organism AMR code for '{}'",
                source, organism_name
            );
            stats.skip_file(format!("{}: organism '{}' unresolved", source, organism_name));
            return ExtractResult {
                observations,
                stats,
            };
        };
        info!(
            "Found organism '{}' -> AMR code '{}'",
            organism_name, organism_id
        );

        // Stage 3: results header row
        let Some(header_row) = find_results_header(grid) else {
            warn!("Could not find data table header in {}, skipping", source);
            stats.skip_file(format!("{}: no results header row", source));
            return ExtractResult {
                observations,
                stats,
            };
        };

        // Stage 4: column mapping
        let Some(columns) = ColumnMap::build(grid, header_row) else {
            warn!("Could not map 'N' or 'R %' columns in {}, skipping", source);
            stats.skip_file(format!("{}: required columns unmapped", source));
            return ExtractResult {
                observations,
                stats,
            };
        };
        debug!(
            "Results table in {} at row {}: N -> column {}, R % -> column {}",
            source, header_row, columns.n_isolates, columns.resistance_pct
        );

        // Stage 5: body rows
        for (row_index, _) in grid.rows().skip(header_row + 1) {
            stats.rows_examined += 1;

            let name_cell = grid.cell(row_index, columns.antibiotic);
            let n_cell = grid.cell(row_index, columns.n_isolates);
            let r_cell = grid.cell(row_index, columns.resistance_pct);

            // A data row has an indented antibiotic name and both values
            // present; anything else is a section header or filler.
            let indented = name_cell
                .as_text()
                .is_some_and(|text| text.starts_with(DATA_ROW_INDENT));
            if !indented || n_cell.is_empty() || r_cell.is_empty() {
                continue;
            }

            let antibiotic_name = name_cell.display_value().trim().to_string();
            if antibiotic_name.is_empty() {
                continue;
            }

            let Some(antibiotic_id) = self
                .resolver
                .resolve(&antibiotic_name, NameKind::Antibiotic)
                .await
            else {
                warn!(
                    "Could not get AMR code for antibiotic '{}', skipping entry",
                    antibiotic_name
                );
                stats.skip_row(format!(
                    "row {}: antibiotic '{}' unresolved",
                    row_index, antibiotic_name
                ));
                continue;
            };

            // Both numeric fields must parse for the row to count; either
            // failing skips it with one combined diagnostic.
            let parsed = parse_isolate_count(n_cell)
                .and_then(|count| parse_resistance_value(r_cell).map(|pct| (count, pct)));
            let (n_isolates, resistance_pct) = match parsed {
                Ok(values) => values,
                Err(error) => {
                    warn!(
                        "Could not parse data for '{}': N='{}', R%='{}' ({}), skipping entry",
                        antibiotic_name,
                        n_cell.display_value(),
                        r_cell.display_value(),
                        error
                    );
                    stats.skip_row(format!("row {}: {}", row_index, error));
                    continue;
                }
            };

            observations.push(Observation {
                organism_id: organism_id.clone(),
                antibiotic_id,
                resistance_pct,
                n_isolates,
            });
            stats.observations_extracted += 1;
        }

        info!(
            "Extracted {} data points from {}",
            stats.observations_extracted, source
        );

        ExtractResult {
            observations,
            stats,
        }
    }
}
