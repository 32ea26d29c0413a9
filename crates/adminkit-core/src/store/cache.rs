// ── Resource cache ──
//
// Request identity -> last fetched collection. Entries are replaced
// wholesale on every fetch; records are never patched in place.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

use crate::cache_key::CacheKey;
use crate::record::Record;

/// Concurrent map from [`CacheKey`] to the backend-ordered collection.
///
/// Reads hand out cheap `Arc` clones. Every write bumps a version counter
/// that subscribers can watch to re-render.
pub struct ResourceCache {
    entries: DashMap<CacheKey, Arc<Vec<Record>>>,

    /// Version counter, bumped on every write.
    version: watch::Sender<u64>,
}

impl ResourceCache {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        Self {
            entries: DashMap::new(),
            version,
        }
    }

    /// The cached collection for `key`, if any.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<Vec<Record>>> {
        self.entries.get(key).map(|r| Arc::clone(r.value()))
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Replace the collection at `key`. Last write wins.
    pub(crate) fn store(&self, key: CacheKey, records: Vec<Record>) -> Arc<Vec<Record>> {
        let records = Arc::new(records);
        self.entries.insert(key, Arc::clone(&records));
        self.bump_version();
        records
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys currently cached.
    pub fn keys(&self) -> Vec<CacheKey> {
        self.entries.iter().map(|r| r.key().clone()).collect()
    }

    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    /// Subscribe to the write counter.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new()
    }
}
