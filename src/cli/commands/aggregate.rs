//! Aggregate command implementation
//!
//! The complete aggregation workflow: configuration loading, input
//! discovery, per-file extraction with partial-success semantics, CSV
//! output, and the final summary report.

use std::sync::Arc;
use std::time::Instant;

use colored::Colorize;
use indicatif::HumanDuration;
use tracing::{debug, info, warn};

use super::shared::{RunStats, build_resolver, create_progress_bar, discover_input_files, setup_logging};
use crate::app::services::sheet_extractor::SheetExtractor;
use crate::app::services::{table_writer, workbook_reader};
use crate::cli::args::AggregateArgs;
use crate::config::Config;
use crate::{Observation, Result};

/// Aggregate command runner
///
/// Orchestrates the workflow:
/// 1. Set up logging and configuration
/// 2. Discover and order the input files
/// 3. Extract observations file by file, skipping failures
/// 4. Write the combined CSV and report summary statistics
pub async fn run_aggregate(args: AggregateArgs) -> Result<RunStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting AMR aggregation");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let files = discover_input_files(&args.inputs)?;
    info!("Processing {} input files", files.len());

    let mut stats = RunStats {
        files_discovered: files.len(),
        ..Default::default()
    };

    if args.dry_run {
        info!("Performing dry run - no output will be written");
        for file in &files {
            info!("Would process {}", file.display());
        }
        stats.processing_time = start_time.elapsed();
        return Ok(stats);
    }

    let resolver = Arc::new(build_resolver(&config)?);
    let extractor = SheetExtractor::new(Arc::clone(&resolver));

    let progress = if args.show_progress() {
        create_progress_bar(files.len() as u64, "Extracting")
    } else {
        indicatif::ProgressBar::hidden()
    };

    let mut observations: Vec<Observation> = Vec::new();
    for file in &files {
        let source = file.display().to_string();

        let grid = match workbook_reader::read_grid(file) {
            Ok(grid) => grid,
            Err(error) => {
                warn!("Skipping {}: {}", source, error);
                stats.files_skipped += 1;
                progress.inc(1);
                continue;
            }
        };

        let result = extractor.extract(&grid, &source).await;
        if result.stats.file_skipped {
            stats.files_skipped += 1;
        } else {
            stats.files_processed += 1;
        }
        stats.rows_skipped += result.stats.rows_skipped;
        stats.observations_extracted += result.stats.observations_extracted;
        observations.extend(result.observations);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let resolver_stats = resolver.stats();
    stats.lookups_performed = resolver_stats.lookups_performed;
    stats.cache_hits = resolver_stats.cache_hits;
    stats.processing_time = start_time.elapsed();

    if observations.is_empty() {
        info!("No data was extracted; nothing to write");
        report_summary(&args, &stats, None);
        return Ok(stats);
    }

    table_writer::write_observations(&args.output, &observations)?;
    let output_path = args.output.display().to_string();
    report_summary(&args, &stats, Some(output_path.as_str()));

    Ok(stats)
}

/// Load configuration and apply CLI flag overrides
fn load_configuration(args: &AggregateArgs) -> Result<Config> {
    let mut config = Config::load_layered(args.config_file.as_deref())?;

    if let Some(program) = &args.lookup_program {
        config.lookup.program = program.clone();
    }
    if let Some(script) = &args.organism_script {
        config.lookup.organism_script = script.clone();
    }
    if let Some(script) = &args.antibiotic_script {
        config.lookup.antibiotic_script = script.clone();
    }
    if let Some(mapping_file) = &args.mapping_file {
        config.lookup.mapping_file = Some(mapping_file.clone());
    }
    if let Some(timeout) = args.lookup_timeout {
        config.lookup.timeout_secs = timeout;
    }
    config.logging.level = args.get_log_level().to_string();

    config.validate()?;
    Ok(config)
}

/// Print the end-of-run summary
fn report_summary(args: &AggregateArgs, stats: &RunStats, output: Option<&str>) {
    if args.quiet {
        return;
    }

    println!();
    println!("{}", "Aggregation Summary".bold());
    println!("  Files discovered:  {}", stats.files_discovered);
    println!("  Files processed:   {}", stats.files_processed);
    if stats.files_skipped > 0 {
        println!(
            "  Files skipped:     {}",
            stats.files_skipped.to_string().yellow()
        );
    }
    if stats.rows_skipped > 0 {
        println!(
            "  Rows skipped:      {}",
            stats.rows_skipped.to_string().yellow()
        );
    }
    println!(
        "  Data points:       {}",
        stats.observations_extracted.to_string().green().bold()
    );
    println!(
        "  Lookups:           {} external, {} cached",
        stats.lookups_performed, stats.cache_hits
    );
    println!(
        "  Elapsed:           {}",
        HumanDuration(stats.processing_time)
    );
    match output {
        Some(path) => println!("  Output:            {}", path.green()),
        None => println!("  Output:            {}", "none (no data points)".yellow()),
    }
}
