//! Configuration management and validation
//!
//! Layered configuration for the aggregator: built-in defaults, an optional
//! TOML file from the platform config directory (or `--config`), and CLI
//! flag overrides applied last.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    DEFAULT_ANTIBIOTIC_SCRIPT, DEFAULT_LOOKUP_PROGRAM, DEFAULT_LOOKUP_TIMEOUT_SECS,
    DEFAULT_ORGANISM_SCRIPT,
};
use crate::{Error, Result};

/// Complete aggregator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// External lookup collaborator settings
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the external name-to-code lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Interpreter launched for every lookup invocation
    #[serde(default = "default_program")]
    pub program: String,

    /// Script resolving organism names
    #[serde(default = "default_organism_script")]
    pub organism_script: PathBuf,

    /// Script resolving antibiotic names
    #[serde(default = "default_antibiotic_script")]
    pub antibiotic_script: PathBuf,

    /// Upper bound on one lookup invocation, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional offline mapping file; takes precedence over the scripts
    #[serde(default)]
    pub mapping_file: Option<PathBuf>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when no verbosity flags are given
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_program() -> String {
    DEFAULT_LOOKUP_PROGRAM.to_string()
}

fn default_organism_script() -> PathBuf {
    PathBuf::from(DEFAULT_ORGANISM_SCRIPT)
}

fn default_antibiotic_script() -> PathBuf {
    PathBuf::from(DEFAULT_ANTIBIOTIC_SCRIPT)
}

fn default_timeout_secs() -> u64 {
    DEFAULT_LOOKUP_TIMEOUT_SECS
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            organism_script: default_organism_script(),
            antibiotic_script: default_antibiotic_script(),
            timeout_secs: default_timeout_secs(),
            mapping_file: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Default config file location under the platform config directory
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("amr-aggregator").join("config.toml"))
            .ok_or_else(|| Error::configuration("Could not determine config directory"))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load configuration with the layered approach (defaults, then file)
    ///
    /// An explicitly given file must exist; the default location is used
    /// only when present.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_file {
            debug!("Loading config file {}", path.display());
            return Self::from_file(path);
        }

        match Self::default_config_path() {
            Ok(path) if path.exists() => {
                debug!("Loading default config file {}", path.display());
                Self::from_file(&path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Lookup timeout as a duration
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup.timeout_secs)
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.lookup.timeout_secs == 0 {
            return Err(Error::configuration(
                "Lookup timeout must be greater than 0 seconds",
            ));
        }

        if self.lookup.program.trim().is_empty() {
            return Err(Error::configuration("Lookup program cannot be empty"));
        }

        if let Some(mapping_file) = &self.lookup.mapping_file {
            if !mapping_file.exists() {
                return Err(Error::configuration(format!(
                    "Mapping file does not exist: {}",
                    mapping_file.display()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.lookup.program, "Rscript");
        assert_eq!(config.lookup.timeout_secs, 30);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[lookup]").unwrap();
        writeln!(file, "timeout_secs = 5").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.lookup.timeout_secs, 5);
        assert_eq!(config.lookup.program, "Rscript");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "lookup = not toml").unwrap();

        let result = Config::from_file(file.path());
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.lookup.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_mapping_file_rejected() {
        let mut config = Config::default();
        config.lookup.mapping_file = Some(PathBuf::from("/nonexistent/mapping.csv"));
        assert!(config.validate().is_err());
    }
}
