//! Batch resolution across many roots.
//!
//! Resolves several roots against one graph snapshot and records a registry
//! of what each pass produced. Passes are independent, so they can run on
//! worker threads over the same shared graph.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use crate::canonical::{canonical_hash_hex, CanonicalError};
use crate::graph::GraphIndex;
use crate::resolver::resolve;
use crate::snapshot::GraphSnapshot;
use crate::types::{Grade, PersonId, RelationshipIndex};

/// Result of a batch resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResolution {
    /// Snapshot id the batch was computed against.
    pub snapshot_id: String,
    /// Index per root.
    pub indexes: BTreeMap<PersonId, RelationshipIndex>,
    /// Registry of per-root metadata.
    pub registry: ResolutionRegistry,
}

/// Registry of every pass in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRegistry {
    /// Entries in root order.
    pub entries: Vec<ResolutionRegistryEntry>,
    /// Hash of the entries for integrity verification.
    pub registry_hash: String,
}

/// Metadata for one resolved root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRegistryEntry {
    /// The root.
    pub root: PersonId,
    /// Number of reachable people (root included).
    pub familiar_count: usize,
    /// Highest grade reached, `None` for a root missing from the graph.
    pub deepest_grade: Option<Grade>,
    /// Entries that fell through every classification rule.
    pub unclassified_count: usize,
    /// Fingerprint of the index.
    pub index_fingerprint: String,
}

impl ResolutionRegistry {
    /// Create a registry from entries.
    pub fn new(entries: Vec<ResolutionRegistryEntry>) -> Result<Self, CanonicalError> {
        let registry_hash = canonical_hash_hex(&entries)?;
        Ok(Self { entries, registry_hash })
    }

    /// Get entry by root.
    pub fn get(&self, root: &PersonId) -> Option<&ResolutionRegistryEntry> {
        self.entries.iter().find(|e| &e.root == root)
    }
}

/// Batch resolver over one graph snapshot.
pub struct BatchResolver<'g> {
    graph: &'g GraphIndex,
    snapshot: GraphSnapshot,
}

impl<'g> BatchResolver<'g> {
    /// Create a batch resolver, fingerprinting the graph once.
    pub fn new(graph: &'g GraphIndex) -> Self {
        Self {
            graph,
            snapshot: GraphSnapshot::compute(graph),
        }
    }

    /// The snapshot every pass runs against.
    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.snapshot
    }

    /// Resolve every root, one after another.
    ///
    /// Repeated roots are resolved once.
    pub fn resolve_all(&self, roots: &[PersonId]) -> Result<BatchResolution, CanonicalError> {
        let indexes = dedup(roots)
            .into_iter()
            .map(|root| (root.clone(), resolve(self.graph, root)))
            .collect();
        self.finish(indexes)
    }

    /// Resolve every root on up to `workers` scoped threads.
    ///
    /// Produces the same output as [`resolve_all`](Self::resolve_all).
    pub fn resolve_all_parallel(
        &self,
        roots: &[PersonId],
        workers: NonZeroUsize,
    ) -> Result<BatchResolution, CanonicalError> {
        let roots = dedup(roots);
        if roots.is_empty() {
            return self.finish(BTreeMap::new());
        }
        let chunk_size = roots.len().div_ceil(workers.get());
        let graph = self.graph;

        let indexes = std::thread::scope(|scope| {
            let handles: Vec<_> = roots
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|root| ((*root).clone(), resolve(graph, root)))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(resolved) => resolved,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect::<BTreeMap<_, _>>()
        });

        self.finish(indexes)
    }

    fn finish(
        &self,
        indexes: BTreeMap<PersonId, RelationshipIndex>,
    ) -> Result<BatchResolution, CanonicalError> {
        let entries = indexes
            .iter()
            .map(|(root, index)| {
                Ok(ResolutionRegistryEntry {
                    root: root.clone(),
                    familiar_count: index.len(),
                    deepest_grade: index.deepest_grade(),
                    unclassified_count: index.unclassified().count(),
                    index_fingerprint: index.fingerprint()?,
                })
            })
            .collect::<Result<Vec<_>, CanonicalError>>()?;

        tracing::debug!(
            snapshot_id = %self.snapshot.snapshot_id,
            roots = entries.len(),
            "batch resolution complete"
        );

        Ok(BatchResolution {
            snapshot_id: self.snapshot.snapshot_id.clone(),
            indexes,
            registry: ResolutionRegistry::new(entries)?,
        })
    }
}

fn dedup(roots: &[PersonId]) -> Vec<&PersonId> {
    let mut seen = std::collections::BTreeSet::new();
    roots.iter().filter(|root| seen.insert(*root)).collect()
}
