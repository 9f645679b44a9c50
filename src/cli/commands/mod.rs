//! Command implementations for the AMR aggregator CLI
//!
//! This module contains the command execution logic and error handling for
//! the CLI interface. Each command is implemented in its own module.

pub mod aggregate;
pub mod resolve;
pub mod shared;

// Re-export the main types for easy access
pub use shared::RunStats;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for the AMR aggregator
///
/// Dispatches to the appropriate subcommand handler based on CLI args:
/// - `aggregate`: the full extraction-and-aggregation workflow
/// - `resolve`: single-name lookup against the configured backend
pub async fn run(args: Args) -> Result<RunStats> {
    match args.get_command() {
        Commands::Aggregate(aggregate_args) => aggregate::run_aggregate(aggregate_args).await,
        Commands::Resolve(resolve_args) => resolve::run_resolve(resolve_args).await,
    }
}
