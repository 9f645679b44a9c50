//! Shared components for CLI commands
//!
//! Common types and functions used across command implementations: run
//! statistics, logging setup, input file discovery, and the resolver
//! construction shared by both subcommands.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::app::services::code_resolver::{CodeResolver, LookupBackend, ScriptLookup, TableLookup};
use crate::config::Config;
use crate::constants::SPREADSHEET_EXTENSIONS;
use crate::{Error, Result};

/// Run statistics for reporting across commands
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Number of input files discovered
    pub files_discovered: usize,
    /// Number of files fully processed
    pub files_processed: usize,
    /// Number of files skipped (structural problems or decode failures)
    pub files_skipped: usize,
    /// Number of data rows skipped within processed files
    pub rows_skipped: usize,
    /// Number of observations aggregated
    pub observations_extracted: usize,
    /// External lookups performed
    pub lookups_performed: usize,
    /// Lookups answered from the memo cache
    pub cache_hits: usize,
    /// Total processing time
    pub processing_time: Duration,
}

/// Set up structured logging to stderr
///
/// `RUST_LOG` takes precedence over the level derived from the verbosity
/// flags; quiet mode drops to a compact format.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("amr_aggregator={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Expand input arguments into a deduplicated, sorted list of files
///
/// Each argument is either a directory (searched recursively for
/// spreadsheet files), or a path/glob pattern expanded via glob. The
/// resulting set is lexicographically sorted so output ordering is
/// reproducible regardless of argument order or OS iteration order.
/// Resolving zero files is an error listing the original arguments.
pub fn discover_input_files(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(false)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.path().is_file() && is_spreadsheet(entry.path()) {
                    files.insert(entry.path().to_path_buf());
                }
            }
        } else {
            let matches = glob::glob(pattern)
                .map_err(|e| Error::invalid_pattern(pattern, e.to_string()))?;
            for entry in matches {
                match entry {
                    Ok(path) if path.is_file() => {
                        files.insert(path);
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Skipping unreadable match for '{}': {}", pattern, e),
                }
            }
        }
    }

    if files.is_empty() {
        return Err(Error::no_input_files(patterns.join(", ")));
    }

    let files: Vec<PathBuf> = files.into_iter().collect();
    debug!("Discovered {} input files", files.len());
    for file in &files {
        debug!("  Found: {}", file.display());
    }
    Ok(files)
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SPREADSHEET_EXTENSIONS.contains(&ext.as_str()))
}

/// Build the code resolver from the effective configuration
///
/// A configured mapping file selects the offline table backend; otherwise
/// lookups go through the external scripts.
pub fn build_resolver(config: &Config) -> Result<CodeResolver> {
    let backend = match &config.lookup.mapping_file {
        Some(mapping_file) => {
            debug!("Using offline mapping file {}", mapping_file.display());
            LookupBackend::Table(TableLookup::from_path(mapping_file)?)
        }
        None => LookupBackend::Script(ScriptLookup::new(
            config.lookup.program.clone(),
            config.lookup.organism_script.clone(),
            config.lookup.antibiotic_script.clone(),
            config.lookup_timeout(),
        )),
    };

    Ok(CodeResolver::new(backend))
}

/// Check if an error is critical enough to stop processing
pub fn is_critical_error(error: &Error) -> bool {
    matches!(
        error,
        Error::Configuration { .. } | Error::NoInputFiles { .. } | Error::CsvWrite { .. }
    )
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
