//! Lookup backends for name-to-code resolution
//!
//! The production backend invokes the external lookup scripts as
//! subprocesses, one call per name, capturing stdout as the candidate code
//! and stderr as the failure diagnostic. The table backend answers from an
//! in-process mapping loaded from a CSV file; it doubles as the substitution
//! point for tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::app::services::code_resolver::resolver::NameKind;
use crate::{Error, Result};

/// Where resolution answers come from
#[derive(Debug)]
pub enum LookupBackend {
    /// External lookup scripts invoked per name
    Script(ScriptLookup),
    /// In-process mapping table
    Table(TableLookup),
}

impl LookupBackend {
    /// Look up the code for an already-normalized name
    ///
    /// Returns the raw stdout of the collaborator on success; trimming and
    /// the empty-code check are the resolver's concern.
    pub async fn lookup(&self, name: &str, kind: NameKind) -> Result<String> {
        match self {
            LookupBackend::Script(script) => script.invoke(name, kind).await,
            LookupBackend::Table(table) => table.get(name, kind),
        }
    }
}

/// Subprocess-based lookup against the external resolver scripts
#[derive(Debug)]
pub struct ScriptLookup {
    /// Interpreter launched for every lookup, e.g. "Rscript"
    program: String,
    /// Script resolving organism names
    organism_script: PathBuf,
    /// Script resolving antibiotic names
    antibiotic_script: PathBuf,
    /// Upper bound on one invocation; a hung collaborator counts as failed
    timeout: Duration,
}

impl ScriptLookup {
    /// Create a script lookup backend
    pub fn new(
        program: impl Into<String>,
        organism_script: impl Into<PathBuf>,
        antibiotic_script: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            organism_script: organism_script.into(),
            antibiotic_script: antibiotic_script.into(),
            timeout,
        }
    }

    fn script_for(&self, kind: NameKind) -> &Path {
        match kind {
            NameKind::Organism => &self.organism_script,
            NameKind::Antibiotic => &self.antibiotic_script,
        }
    }

    /// Run one lookup invocation and capture its output
    async fn invoke(&self, name: &str, kind: NameKind) -> Result<String> {
        let script = self.script_for(kind);
        debug!(
            "Invoking {} {} for {} '{}'",
            self.program,
            script.display(),
            kind,
            name
        );

        let mut command = Command::new(&self.program);
        command.arg(script).arg(name).kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                Error::lookup(
                    name,
                    format!("lookup timed out after {}s", self.timeout.as_secs()),
                )
            })?
            .map_err(|e| Error::lookup(name, format!("failed to run {}: {}", self.program, e)))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(Error::lookup(name, diagnostic))
        }
    }
}

/// One row of the mapping file consumed by [`TableLookup::from_path`]
#[derive(Debug, Deserialize)]
struct MappingRow {
    kind: String,
    name: String,
    code: String,
}

/// In-process lookup table, keyed by normalized name
#[derive(Debug, Default)]
pub struct TableLookup {
    organisms: HashMap<String, String>,
    antibiotics: HashMap<String, String>,
}

impl TableLookup {
    /// Build a table from explicit (name, code) pairs
    pub fn from_pairs<O, A>(organisms: O, antibiotics: A) -> Self
    where
        O: IntoIterator<Item = (String, String)>,
        A: IntoIterator<Item = (String, String)>,
    {
        Self {
            organisms: organisms.into_iter().collect(),
            antibiotics: antibiotics.into_iter().collect(),
        }
    }

    /// Load a mapping table from a CSV file with columns `kind,name,code`
    ///
    /// `kind` is `organism` or `antibiotic`; unknown kinds are rejected so a
    /// malformed mapping file fails loudly instead of resolving nothing.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to open mapping file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut table = TableLookup::default();
        for (index, record) in reader.deserialize::<MappingRow>().enumerate() {
            let row = record.map_err(|e| {
                Error::configuration(format!(
                    "Invalid mapping file '{}' at record {}: {}",
                    path.display(),
                    index + 1,
                    e
                ))
            })?;

            let target = match row.kind.trim() {
                "organism" => &mut table.organisms,
                "antibiotic" => &mut table.antibiotics,
                other => {
                    return Err(Error::configuration(format!(
                        "Unknown kind '{}' in mapping file '{}' at record {}",
                        other,
                        path.display(),
                        index + 1
                    )));
                }
            };
            target.insert(row.name.trim().to_string(), row.code.trim().to_string());
        }

        debug!(
            "Loaded mapping file {}: {} organisms, {} antibiotics",
            path.display(),
            table.organisms.len(),
            table.antibiotics.len()
        );
        Ok(table)
    }

    fn get(&self, name: &str, kind: NameKind) -> Result<String> {
        let mapping = match kind {
            NameKind::Organism => &self.organisms,
            NameKind::Antibiotic => &self.antibiotics,
        };
        mapping
            .get(name)
            .cloned()
            .ok_or_else(|| Error::lookup(name, format!("no {} mapping entry", kind)))
    }
}
