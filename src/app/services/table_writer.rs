//! CSV output writing for aggregated observations
//!
//! The aggregated dataset is a flat UTF-8 CSV file with a fixed column
//! order taken from the [`Observation`] field order:
//! `organism_id,antibiotic_id,resistance_pct,n_isolates`. No index column.

use std::path::Path;

use tracing::info;

use crate::app::models::Observation;
use crate::{Error, Result};

/// Write the aggregated observations to a CSV file
///
/// The header row is emitted from the observation field names; one data row
/// per observation, in the order given.
pub fn write_observations(path: &Path, observations: &[Observation]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        Error::csv_write(
            format!("Failed to create output file '{}'", path.display()),
            Some(e),
        )
    })?;

    for observation in observations {
        writer.serialize(observation)?;
    }
    writer
        .flush()
        .map_err(|e| Error::io(format!("Failed to flush '{}'", path.display()), e))?;

    info!(
        "Saved {} aggregated data points to {}",
        observations.len(),
        path.display()
    );
    Ok(())
}
