//! # kinship-kernel
//!
//! Deterministic kinship resolution for family graphs.
//!
//! The kernel answers one question:
//!
//! > Given a root person, how is **everyone else** in the graph related to them?
//!
//! ## Core Contract
//!
//! 1. Walk the graph breadth-first from the root, keeping the first
//!    (shortest) hop path that reaches each person
//! 2. Classify each path into a relation code, a gendered label and a
//!    closeness grade
//! 3. Return the results bucketed by grade, in discovery order
//!
//! ## Architecture
//!
//! ```text
//! PeopleStore → GraphIndex → resolve(root) → classify(path) → RelationshipIndex
//!                   ↓                                               ↑
//!             GraphSnapshot ──────────→ ResolutionCache ────────────┘
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same graph + same root → identical index
//! - Ties between equally short paths go to parents, then each marriage's
//!   spouse and children, then siblings
//! - Buckets are ordered by grade; entries by discovery order

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod classify;
pub mod graph;
pub mod store;
pub mod resolver;
pub mod canonical;
pub mod snapshot;
pub mod cache;
pub mod batch;

// Re-exports
pub use types::{
    PersonId, Person, Gender, LabelBranch, Relationships, Marriage,
    HopKind, RelationPath, PathParseError,
    Familiar, RelationCode, GenderedLabel, Grade, RelationshipIndex,
    DEEPEST_TABLE_GRADE, UNCLASSIFIED_GRADE,
};
pub use classify::{classify, canonical_entries, lookup, Classification, LabelRule, PathEntry};
pub use graph::{GraphIndex, GraphEdge, GraphError};
pub use store::{PeopleStore, InMemoryPeopleStore};
pub use resolver::{resolve, resolve_strict, ResolveError};
pub use canonical::{canonical_hash, canonical_hash_hex, CanonicalError};
pub use snapshot::GraphSnapshot;
pub use cache::{ResolutionCache, CacheConfig, CacheStats, CachedResolution};
pub use batch::{BatchResolver, BatchResolution, ResolutionRegistry, ResolutionRegistryEntry};

/// Schema version for all kinship kernel types.
/// Increment on breaking changes to any schema type.
pub const KINSHIP_SCHEMA_VERSION: &str = "1.0.0";
