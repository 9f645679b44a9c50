//! AMR Aggregator Library
//!
//! A Rust library for extracting antimicrobial-resistance (AMR) measurements
//! from semi-structured spreadsheet reports and aggregating them into a
//! normalized CSV dataset.
//!
//! This library provides tools for:
//! - Decoding spreadsheet files into a uniform cell grid
//! - Locating organism metadata and results-table headers in free-form layouts
//! - Parsing locale-formatted numeric values (decimal comma, dash ranges)
//! - Resolving free-text organism/antibiotic names to standardized AMR codes
//!   through an external lookup collaborator, with memoization
//! - Writing the aggregated observations as a flat CSV table
//! - Per-row and per-file error recovery with structured diagnostics

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod code_resolver;
        pub mod sheet_extractor;
        pub mod table_writer;
        pub mod workbook_reader;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Cell, Observation, SheetGrid};
pub use config::Config;

/// Result type alias for the AMR aggregator
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for AMR aggregation operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Spreadsheet could not be decoded into a cell grid
    #[error("Workbook decode error in file '{file}': {message}")]
    Decode { file: String, message: String },

    /// External code lookup failed
    #[error("Lookup failed for '{name}': {message}")]
    Lookup { name: String, message: String },

    /// Numeric field could not be parsed
    #[error("Could not parse value '{value}': {message}")]
    ValueParse { value: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Input pattern is not valid glob syntax
    #[error("Invalid input pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// No input path or pattern resolved to an existing file
    #[error("No input files found matching: {patterns}")]
    NoInputFiles { patterns: String },

    /// CSV output writing error
    #[error("CSV writing error: {message}")]
    CsvWrite {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a workbook decode error
    pub fn decode(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a lookup failure error
    pub fn lookup(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lookup {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a value parse error, preserving the offending raw value
    pub fn value_parse(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValueParse {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid glob pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a no-input-files error from the original patterns
    pub fn no_input_files(patterns: impl Into<String>) -> Self {
        Self::NoInputFiles {
            patterns: patterns.into(),
        }
    }

    /// Create a CSV writing error with context
    pub fn csv_write(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvWrite {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvWrite {
            message: "CSV writing failed".to_string(),
            source: Some(error),
        }
    }
}
