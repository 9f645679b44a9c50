//! Name-to-code resolution for organisms and antibiotics
//!
//! This module maps the free-text names found in the reports to standardized
//! AMR codes. Resolution goes through a pluggable backend: the production
//! path shells out to the external lookup scripts, while an in-process
//! mapping table serves offline runs and tests.
//!
//! ## Architecture
//!
//! - [`normalize`] - Text cleanup applied to every name before lookup
//! - [`backend`] - Lookup backends (subprocess script, in-process table)
//! - [`resolver`] - Memoizing resolver facade used by the extraction pipeline
//!
//! A failed lookup is never an error for the caller: the resolver logs the
//! diagnostic and yields "no code", and the enclosing row or file is skipped.

pub mod backend;
pub mod normalize;
pub mod resolver;

// Re-export main types for easy access
pub use backend::{LookupBackend, ScriptLookup, TableLookup};
pub use normalize::normalize_name;
pub use resolver::{CodeResolver, NameKind, ResolverStats};
