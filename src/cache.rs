//! Memoized resolution results.
//!
//! Resolution is a pure function of (graph snapshot, root), so a result can
//! be reused for as long as the snapshot id stays the same. The cache is an
//! optional layer for callers that switch roots back and forth; the
//! resolver itself holds no state.
//!
//! ## Cache Key Design
//!
//! The key is an xxh64 over:
//! - `snapshot_id`
//! - the root person id
//!
//! Any edit to the graph changes the snapshot id and therefore misses.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::RwLock;

use crate::canonical::hash_parts;
use crate::graph::GraphIndex;
use crate::resolver::resolve;
use crate::snapshot::GraphSnapshot;
use crate::types::{PersonId, RelationshipIndex};

const FALLBACK_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(n) => n,
    None => unreachable!(),
};

/// Configuration for the resolution cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached indexes.
    pub max_entries: usize,
    /// Whether to enable the cache.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1024,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ResolutionCacheKey(u64);

impl ResolutionCacheKey {
    fn compute(snapshot_id: &str, root: &PersonId) -> Self {
        Self(hash_parts([snapshot_id.as_bytes(), root.as_str().as_bytes()]))
    }
}

/// Result of a cached resolution.
#[derive(Debug, Clone)]
pub struct CachedResolution {
    /// The resolved index.
    pub index: Arc<RelationshipIndex>,
    /// Whether this result came from cache.
    pub cache_hit: bool,
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Current number of entries in the cache.
    pub len: usize,
    /// Maximum capacity of the cache.
    pub cap: usize,
}

/// Resolver front-end that memoizes indexes per (snapshot, root).
///
/// Thread-safe; share it behind an `Arc` across threads.
pub struct ResolutionCache {
    cache: Option<RwLock<LruCache<ResolutionCacheKey, Arc<RelationshipIndex>>>>,
}

impl ResolutionCache {
    /// Create a cache.
    pub fn new(config: CacheConfig) -> Self {
        let cache = config.enabled.then(|| {
            let size = NonZeroUsize::new(config.max_entries).unwrap_or(FALLBACK_CAPACITY);
            RwLock::new(LruCache::new(size))
        });
        Self { cache }
    }

    /// Resolve `root`, reusing a cached index for the same snapshot.
    ///
    /// `snapshot` must have been computed from `graph`; a stale snapshot
    /// returns results for the graph it was computed from.
    pub fn resolve(
        &self,
        graph: &GraphIndex,
        snapshot: &GraphSnapshot,
        root: &PersonId,
    ) -> CachedResolution {
        let Some(cache) = &self.cache else {
            return CachedResolution {
                index: Arc::new(resolve(graph, root)),
                cache_hit: false,
            };
        };

        let key = ResolutionCacheKey::compute(&snapshot.snapshot_id, root);

        // get() promotes the entry, so it needs the write lock
        let hit = cache.write().get(&key).map(Arc::clone);
        if let Some(index) = hit {
            tracing::trace!(root = %root, snapshot_id = %snapshot.snapshot_id, "resolution cache hit");
            return CachedResolution {
                index,
                cache_hit: true,
            };
        }

        tracing::trace!(root = %root, snapshot_id = %snapshot.snapshot_id, "resolution cache miss");
        let index = Arc::new(resolve(graph, root));
        cache.write().put(key, Arc::clone(&index));

        CachedResolution {
            index,
            cache_hit: false,
        }
    }

    /// Drop the cached index for one root under one snapshot.
    pub fn invalidate(&self, snapshot: &GraphSnapshot, root: &PersonId) {
        if let Some(cache) = &self.cache {
            cache
                .write()
                .pop(&ResolutionCacheKey::compute(&snapshot.snapshot_id, root));
        }
    }

    /// Get cache statistics.
    ///
    /// Returns `None` if caching is disabled.
    pub fn stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| {
            let cache = cache.read();
            CacheStats {
                len: cache.len(),
                cap: cache.cap().get(),
            }
        })
    }

    /// Clear the cache.
    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.write().clear();
        }
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
