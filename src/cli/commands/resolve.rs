//! Resolve command implementation
//!
//! Resolves a single free-text name to its AMR code and prints it. Mainly a
//! debugging aid for the lookup collaborator: the same normalization,
//! backend selection, and timeout apply as during aggregation.

use tracing::debug;

use super::shared::{RunStats, build_resolver, setup_logging};
use crate::cli::args::ResolveArgs;
use crate::config::Config;
use crate::{Error, Result};

/// Resolve command runner
///
/// Prints the resolved code to stdout; an unresolved name is an error so
/// scripts can branch on the exit status.
pub async fn run_resolve(args: ResolveArgs) -> Result<RunStats> {
    setup_logging(args.get_log_level(), false)?;
    debug!("Command line arguments: {:?}", args);

    let config = load_configuration(&args)?;
    let resolver = build_resolver(&config)?;

    let kind = args.kind.into();
    match resolver.resolve(&args.name, kind).await {
        Some(code) => {
            println!("{}", code);
            Ok(RunStats {
                lookups_performed: 1,
                ..Default::default()
            })
        }
        None => Err(Error::lookup(
            &args.name,
            format!("no {} code resolved", kind),
        )),
    }
}

/// Load configuration and apply CLI flag overrides
fn load_configuration(args: &ResolveArgs) -> Result<Config> {
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

    config.validate()?;
    Ok(config)
}
