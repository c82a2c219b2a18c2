use crate::spatial::Kernel;
use std::collections::HashMap;
use std::sync::Arc;

/// Memoization cache for sub-kernel families
///
/// Stores the ordered back-off family of every kernel decomposed so far,
/// including the intermediate kernels reached during recursion. Entries are
/// never evicted; the set of distinct kernels in one session is tiny.
#[derive(Default, Debug)]
pub struct SubKernelCache {
    /// Kernel to ordered family mapping
    families: HashMap<Kernel, Arc<[Kernel]>>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl SubKernelCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve a cached family, recording a hit or a miss
    pub fn lookup(&mut self, kernel: &Kernel) -> Option<Arc<[Kernel]>> {
        if let Some(family) = self.families.get(kernel) {
            self.stats.hits += 1;
            Some(Arc::clone(family))
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Store a computed family
    ///
    /// An existing entry for an equal kernel is kept; families are a pure
    /// function of the kernel value.
    pub fn insert(&mut self, kernel: Kernel, family: Arc<[Kernel]>) -> Arc<[Kernel]> {
        Arc::clone(self.families.entry(kernel).or_insert(family))
    }

    /// Whether a family for an equal kernel is cached, without touching statistics
    pub fn contains(&self, kernel: &Kernel) -> bool {
        self.families.contains_key(kernel)
    }

    /// Number of cached families
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}
