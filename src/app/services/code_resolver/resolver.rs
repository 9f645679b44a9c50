//! Memoizing resolver facade over the lookup backends
//!
//! The resolver owns the only policy the extraction pipeline needs to know:
//! names are normalized before lookup, an empty code means "no code", and a
//! failed lookup is reported as a diagnostic but never raised. Every result,
//! including a failure, is memoized so repeated names within and across
//! files cost a single external invocation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use tracing::{debug, warn};

use super::backend::LookupBackend;
use super::normalize::normalize_name;

/// Which lookup namespace a name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    Organism,
    Antibiotic,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Organism => write!(f, "organism"),
            NameKind::Antibiotic => write!(f, "antibiotic"),
        }
    }
}

/// Counters describing resolver activity over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// External backend invocations performed
    pub lookups_performed: usize,
    /// Resolutions answered from the memo cache
    pub cache_hits: usize,
    /// Lookups that failed or produced no code
    pub failures: usize,
}

/// Name-to-code resolver with per-run memoization
#[derive(Debug)]
pub struct CodeResolver {
    backend: LookupBackend,
    cache: Mutex<HashMap<(NameKind, String), Option<String>>>,
    stats: Mutex<ResolverStats>,
}

impl CodeResolver {
    /// Create a resolver over the given backend
    pub fn new(backend: LookupBackend) -> Self {
        Self {
            backend,
            cache: Mutex::new(HashMap::new()),
            stats: Mutex::new(ResolverStats::default()),
        }
    }

    /// Resolve a free-text name to its standardized code
    ///
    /// Returns `None` when the lookup fails or yields an empty code. The
    /// failure diagnostic is logged here; callers observe "no code" by
    /// value and decide whether to skip a row or a whole file.
    pub async fn resolve(&self, raw_name: &str, kind: NameKind) -> Option<String> {
        let name = normalize_name(raw_name);
        let key = (kind, name.clone());

        let cached = self
            .cache
            .lock()
            .expect("resolver cache poisoned")
            .get(&key)
            .cloned();
        if let Some(cached) = cached {
            debug!("Cache hit for {} '{}'", kind, name);
            self.stats.lock().expect("resolver stats poisoned").cache_hits += 1;
            return cached;
        }

        self.stats
            .lock()
            .expect("resolver stats poisoned")
            .lookups_performed += 1;

        let resolved = match self.backend.lookup(&name, kind).await {
            Ok(candidate) => {
                let code = candidate.trim().to_string();
                // An empty code from a successful lookup still means "no code"
                if code.is_empty() { None } else { Some(code) }
            }
            Err(error) => {
                warn!("Could not get AMR code for '{}': {}", raw_name, error);
                None
            }
        };

        if resolved.is_none() {
            self.stats.lock().expect("resolver stats poisoned").failures += 1;
        }

        self.cache
            .lock()
            .expect("resolver cache poisoned")
            .insert(key, resolved.clone());
        resolved
    }

    /// Snapshot of the resolver counters
    pub fn stats(&self) -> ResolverStats {
        *self.stats.lock().expect("resolver stats poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::code_resolver::backend::TableLookup;

    fn table_resolver() -> CodeResolver {
        CodeResolver::new(LookupBackend::Table(TableLookup::from_pairs(
            [
                ("Escherichia coli".to_string(), "B_ESCHR_COLI".to_string()),
                ("Klebsiella pneumoniae".to_string(), String::new()),
            ],
            [("Cefepim".to_string(), "FEP".to_string())],
        )))
    }

    #[tokio::test]
    async fn test_resolve_normalizes_before_lookup() {
        let resolver = table_resolver();
        let code = resolver
            .resolve("Escherichia coli (ESBL)", NameKind::Organism)
            .await;
        assert_eq!(code.as_deref(), Some("B_ESCHR_COLI"));
    }

    #[tokio::test]
    async fn test_empty_code_is_no_code() {
        let resolver = table_resolver();
        let code = resolver
            .resolve("Klebsiella pneumoniae", NameKind::Organism)
            .await;
        assert_eq!(code, None);
        assert_eq!(resolver.stats().failures, 1);
    }

    #[tokio::test]
    async fn test_failed_lookup_yields_none_not_error() {
        let resolver = table_resolver();
        let code = resolver.resolve("Unknown organism", NameKind::Organism).await;
        assert_eq!(code, None);
    }

    #[tokio::test]
    async fn test_repeated_names_hit_the_cache() {
        let resolver = table_resolver();

        resolver.resolve("Cefepim", NameKind::Antibiotic).await;
        resolver.resolve("Cefepim (Non-meningitis)", NameKind::Antibiotic).await;
        resolver.resolve("Cefepim", NameKind::Antibiotic).await;

        let stats = resolver.stats();
        assert_eq!(stats.lookups_performed, 1);
        assert_eq!(stats.cache_hits, 2);
    }

    #[tokio::test]
    async fn test_failures_are_memoized_too() {
        let resolver = table_resolver();

        resolver.resolve("Unknown organism", NameKind::Organism).await;
        resolver.resolve("Unknown organism", NameKind::Organism).await;

        let stats = resolver.stats();
        assert_eq!(stats.lookups_performed, 1);
        assert_eq!(stats.cache_hits, 1);
    }

    #[tokio::test]
    async fn test_kinds_are_cached_separately() {
        let resolver = table_resolver();

        assert_eq!(
            resolver.resolve("Cefepim", NameKind::Antibiotic).await.as_deref(),
            Some("FEP")
        );
        assert_eq!(resolver.resolve("Cefepim", NameKind::Organism).await, None);
        assert_eq!(resolver.stats().lookups_performed, 2);
    }
}
