//! Command-line argument definitions for the AMR aggregator
//!
//! This module defines the complete CLI interface using the clap derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::app::services::code_resolver::NameKind;
use crate::{Error, Result};

/// CLI arguments for the AMR aggregator
///
/// Extracts antimicrobial-resistance measurements from semi-structured
/// spreadsheet reports and aggregates them into a normalized CSV dataset.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "amr-aggregator",
    version,
    about = "Aggregate antimicrobial resistance data from spreadsheet reports",
    long_about = "Extracts resistance test results from semi-structured spreadsheet \
                  reports (one organism per file, variable sheet layout), resolves \
                  organism and antibiotic names to standardized AMR codes via an \
                  external lookup, and writes one normalized CSV row per observation."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the AMR aggregator
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Aggregate resistance data from spreadsheet reports (main command)
    Aggregate(AggregateArgs),
    /// Resolve a single name to its AMR code (lookup debugging aid)
    Resolve(ResolveArgs),
}

/// Arguments for the aggregate command (main data processing)
#[derive(Debug, Clone, Parser)]
pub struct AggregateArgs {
    /// Input spreadsheet files, glob patterns, or directories
    ///
    /// Directories are searched recursively for spreadsheet files. At least
    /// one argument must resolve to an existing file.
    #[arg(required = true, value_name = "PATTERN")]
    pub inputs: Vec<String>,

    /// Path for the aggregated CSV output file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// Interpreter for the lookup scripts (default: Rscript)
    #[arg(long = "lookup-program", value_name = "PROGRAM")]
    pub lookup_program: Option<String>,

    /// Script resolving organism names to AMR codes
    #[arg(long = "organism-script", value_name = "FILE")]
    pub organism_script: Option<PathBuf>,

    /// Script resolving antibiotic names to AMR codes
    #[arg(long = "antibiotic-script", value_name = "FILE")]
    pub antibiotic_script: Option<PathBuf>,

    /// Offline name-to-code mapping file (kind,name,code CSV)
    ///
    /// When given, lookups are answered from this table instead of
    /// invoking the lookup scripts.
    #[arg(long = "mapping-file", value_name = "FILE")]
    pub mapping_file: Option<PathBuf>,

    /// Timeout for one lookup invocation, in seconds
    #[arg(long = "lookup-timeout", value_name = "SECS")]
    pub lookup_timeout: Option<u64>,

    /// Path to configuration file (TOML format)
    ///
    /// If not specified, looks for amr-aggregator/config.toml in the
    /// platform config directory.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// List the files that would be processed without processing them
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Arguments for the resolve command (single-name lookup)
#[derive(Debug, Clone, Parser)]
pub struct ResolveArgs {
    /// Free-text name to resolve
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Which lookup namespace the name belongs to
    #[arg(long = "kind", value_enum, value_name = "KIND")]
    pub kind: KindArg,

    /// Interpreter for the lookup scripts (default: Rscript)
    #[arg(long = "lookup-program", value_name = "PROGRAM")]
    pub lookup_program: Option<String>,

    /// Script resolving organism names to AMR codes
    #[arg(long = "organism-script", value_name = "FILE")]
    pub organism_script: Option<PathBuf>,

    /// Script resolving antibiotic names to AMR codes
    #[arg(long = "antibiotic-script", value_name = "FILE")]
    pub antibiotic_script: Option<PathBuf>,

    /// Offline name-to-code mapping file (kind,name,code CSV)
    #[arg(long = "mapping-file", value_name = "FILE")]
    pub mapping_file: Option<PathBuf>,

    /// Timeout for one lookup invocation, in seconds
    #[arg(long = "lookup-timeout", value_name = "SECS")]
    pub lookup_timeout: Option<u64>,

    /// Path to configuration file (TOML format)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Lookup namespace selector for the resolve command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// Organism name lookup
    Organism,
    /// Antibiotic name lookup
    Antibiotic,
}

impl From<KindArg> for NameKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Organism => NameKind::Organism,
            KindArg::Antibiotic => NameKind::Antibiotic,
        }
    }
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl AggregateArgs {
    /// Validate the aggregate command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        // Validate output directory exists if one is named
        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(Error::configuration(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        // Validate explicitly provided paths exist
        for (label, path) in [
            ("Organism script", &self.organism_script),
            ("Antibiotic script", &self.antibiotic_script),
            ("Mapping file", &self.mapping_file),
            ("Config file", &self.config_file),
        ] {
            if let Some(path) = path {
                if !path.exists() {
                    return Err(Error::configuration(format!(
                        "{} does not exist: {}",
                        label,
                        path.display()
                    )));
                }
            }
        }

        if self.lookup_timeout == Some(0) {
            return Err(Error::configuration(
                "Lookup timeout must be greater than 0 seconds",
            ));
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show the progress bar (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ResolveArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn minimal_args(output: PathBuf) -> AggregateArgs {
        AggregateArgs {
            inputs: vec!["reports/*.xlsx".to_string()],
            output,
            lookup_program: None,
            organism_script: None,
            antibiotic_script: None,
            mapping_file: None,
            lookup_timeout: None,
            config_file: None,
            dry_run: false,
            verbose: 0,
            quiet: false,
        }
    }

    #[test]
    fn test_aggregate_args_validation() {
        let temp_dir = TempDir::new().unwrap();
        let args = minimal_args(temp_dir.path().join("out.csv"));
        assert!(args.validate().is_ok());

        // Bare file name in the working directory is fine
        let args = minimal_args(PathBuf::from("out.csv"));
        assert!(args.validate().is_ok());

        // Nonexistent output directory
        let args = minimal_args(PathBuf::from("/nonexistent/dir/out.csv"));
        assert!(args.validate().is_err());

        // Nonexistent mapping file
        let mut args = minimal_args(temp_dir.path().join("out.csv"));
        args.mapping_file = Some(PathBuf::from("/nonexistent/mapping.csv"));
        assert!(args.validate().is_err());

        // Zero timeout
        let mut args = minimal_args(temp_dir.path().join("out.csv"));
        args.lookup_timeout = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = minimal_args(temp_dir.path().join("out.csv"));

        assert_eq!(args.get_log_level(), "warn");

        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");

        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");

        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");

        args.verbose = 0;
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_cli_parsing() {
        let args = Args::try_parse_from([
            "amr-aggregator",
            "aggregate",
            "import/*.xlsx",
            "-o",
            "aggregated.csv",
        ])
        .unwrap();

        match args.get_command() {
            Commands::Aggregate(aggregate) => {
                assert_eq!(aggregate.inputs, vec!["import/*.xlsx"]);
                assert_eq!(aggregate.output, PathBuf::from("aggregated.csv"));
            }
            _ => panic!("expected aggregate command"),
        }

        // Output is required
        let missing =
            Args::try_parse_from(["amr-aggregator", "aggregate", "import/*.xlsx"]);
        assert!(missing.is_err());

        // At least one input is required
        let missing = Args::try_parse_from(["amr-aggregator", "aggregate", "-o", "out.csv"]);
        assert!(missing.is_err());
    }
}
