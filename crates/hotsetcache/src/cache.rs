//! HotSetCache: keyed front end over per-key recency lists

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use ahash::RandomState;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::list::{Insert, RecencyList};
use crate::stats::CacheStats;

/// Shared handle to one key's recency list
type ListHandle<V> = Arc<Mutex<RecencyList<V>>>;

/// Concurrent cache of per-key working sets.
///
/// Each key owns a bounded recency list of distinct values; adding to a
/// full list evicts its least recently used value. Lists for different
/// keys share no lock, so operations on distinct keys run fully in
/// parallel, while every operation on one key serializes on that list's
/// exclusive lock, snapshot reads included.
pub struct HotSetCache<K, V> {
    /// Key table: one recency list per key, created on first add and kept
    /// for the cache's lifetime
    table: RwLock<HashMap<K, ListHandle<V>, RandomState>>,

    /// Activity counters
    stats: Arc<CacheStats>,

    /// Capacity shared by every per-key list
    capacity: usize,
}

impl<K, V> HotSetCache<K, V>
where
    K: Hash + Eq,
    V: Hash + Eq + Clone + fmt::Debug,
{
    /// Create a cache whose per-key lists hold up to `capacity` values.
    ///
    /// # Arguments
    /// * `capacity` - Maximum distinct values retained per key
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        Ok(Self {
            table: RwLock::new(HashMap::with_hasher(RandomState::new())),
            stats: Arc::new(CacheStats::new()),
            capacity,
        })
    }

    /// Add `value` to `key`'s working set as its most recently used entry.
    ///
    /// The key's list is created on first use. Adding a value the list
    /// already holds is a no-op that leaves the existing entry's position
    /// unchanged; use [`mark_used`](Self::mark_used) to promote. A full
    /// list evicts its least recently used value first.
    pub fn add(&self, key: K, value: V) {
        let list = self.list_or_create(key);
        let mut list = list.lock();

        match list.insert(value) {
            Insert::Added => self.stats.record_insert(),
            Insert::Evicted(old) => {
                trace!(evicted = ?old, "evicted least recently used value");
                self.stats.record_insert();
                self.stats.record_eviction();
            }
            Insert::Ignored => self.stats.record_ignored(),
        }
    }

    /// Snapshot `key`'s working set from most to least recently used.
    ///
    /// Returns `None` for a key that never saw an add: reading an unknown
    /// key is a normal empty case, not an error. The snapshot does not
    /// change any entry's recency.
    pub fn get(&self, key: &K) -> Option<Vec<V>> {
        match self.list_of(key) {
            Some(list) => {
                self.stats.record_hit();
                Some(list.lock().snapshot())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Mark `values` as used under `key`, making them the most recent
    /// entries in the given order: `values[0]` ends up at the front,
    /// `values[1]` second, and so on.
    ///
    /// Promotions are applied one value at a time in reverse input order
    /// under a single lock acquisition. A missing value fails the call at
    /// that point; promotions already applied for later input positions
    /// stay in effect (fail-fast, no rollback).
    ///
    /// # Errors
    /// * `Error::KeyNotFound` if nothing was ever added under `key` -
    ///   unlike `get`, promoting against an unseen key is caller misuse
    /// * `Error::ValueNotFound` naming the first processed value that has
    ///   no entry in the key's list
    pub fn mark_used(&self, key: &K, values: &[V]) -> Result<()> {
        let list = self.list_of(key).ok_or(Error::KeyNotFound)?;
        let mut list = list.lock();

        for value in values.iter().rev() {
            if !list.promote(value) {
                return Err(Error::ValueNotFound(format!("{:?}", value)));
            }
            self.stats.record_promotion();
        }

        Ok(())
    }

    /// Capacity shared by every per-key list
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of keys with a recency list
    pub fn key_count(&self) -> usize {
        self.table.read().len()
    }

    /// Number of values currently cached under `key`, zero when unknown
    pub fn value_count(&self, key: &K) -> usize {
        match self.list_of(key) {
            Some(list) => list.lock().len(),
            None => 0,
        }
    }

    /// Check whether any key has been added
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Non-creating lookup of a key's list
    fn list_of(&self, key: &K) -> Option<ListHandle<V>> {
        self.table.read().get(key).cloned()
    }

    /// Return the key's list, creating and registering it atomically on
    /// first access. Concurrent first accesses of one key converge on a
    /// single list instance; the write lock spans only the table entry,
    /// never the list's own operations.
    fn list_or_create(&self, key: K) -> ListHandle<V> {
        if let Some(list) = self.table.read().get(&key) {
            return Arc::clone(list);
        }

        let mut table = self.table.write();
        let list = table.entry(key).or_insert_with(|| {
            debug!("creating recency list for new key");
            Arc::new(Mutex::new(RecencyList::new(self.capacity)))
        });
        Arc::clone(list)
    }
}
