use moka::sync::Cache;

use crate::constants::DEFAULT_LIMIT_CACHE_CAPACITY;

use super::resolver::{LimitsSource, RetrievalLimits, resolve_limits};

/// BLAKE3 digest of `(tag, source identity)`.
fn cache_key(tag: &str, source: &LimitsSource) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(source.identity().as_bytes());
    hasher.update(&[0]);
    hasher.update(tag.as_bytes());
    *hasher.finalize().as_bytes()
}

/// Process-scoped memoizing resolver.
///
/// Construct once at startup and share by reference. Entries are never
/// invalidated on config file changes; a cached result may be stale for the
/// lifetime of the resolver.
pub struct LimitResolver {
    entries: Cache<[u8; 32], RetrievalLimits>,
}

impl LimitResolver {
    /// Creates a resolver with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LIMIT_CACHE_CAPACITY)
    }

    /// Creates a resolver holding at most `capacity` resolved entries.
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Resolves (or returns the memoized) limits for `tag`.
    pub fn resolve(&self, tag: &str, source: &LimitsSource) -> RetrievalLimits {
        let key = cache_key(tag, source);
        self.entries.get_with(key, || resolve_limits(tag, source))
    }

    /// Maximum number of memoized entries.
    pub fn capacity(&self) -> Option<u64> {
        self.entries.policy().max_capacity()
    }

    /// Returns the number of memoized entries.
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    /// Drops every memoized entry.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Runs any pending maintenance tasks in the underlying cache.
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}

impl Default for LimitResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LimitResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LimitResolver")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}
