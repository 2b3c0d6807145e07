use crate::consts::DEDUP_CACHE_CAPACITY;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

/// Resolved source tx hashes keyed by [`MessageId::cache_key`](crate::MessageId::cache_key).
///
/// Reads promote the entry, so eviction removes the least recently *used* key.
/// Empty hashes are never stored.
#[derive(Debug)]
pub struct DedupCache {
    inner: Mutex<LruCache<String, String>>,
}

impl DedupCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().get(key).cloned()
    }

    pub fn insert(&self, key: String, hash: String) {
        if hash.is_empty() {
            return;
        }
        self.inner.lock().put(key, hash);
    }

    /// Checks presence without affecting recency.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().cap().get()
    }
}

impl Default for DedupCache {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEDUP_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}
