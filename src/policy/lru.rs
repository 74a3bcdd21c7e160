//! # Least Recently Used (LRU) Cache
//!
//! An LRU cache composed from one [`LinkedList`] (recency order, values) and
//! one [`Map`] backend (key to node [`Index`]). Both sit on pluggable storage,
//! so the same cache runs on the heap or in a fixed, allocation-free footprint.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                      LruCache<K, V, S, M>                        │
//!   │                                                                  │
//!   │   ┌──────────────────────────────┐                               │
//!   │   │  M: Map<K, Index>            │                               │
//!   │   │  ┌───────┬────────┐          │                               │
//!   │   │  │ key_a │ 0v0 ───┼──┐       │                               │
//!   │   │  │ key_b │ 2v1 ───┼──┼──┐    │                               │
//!   │   │  │ key_c │ 1v0 ───┼──┼──┼─┐  │                               │
//!   │   │  └───────┴────────┘  │  │ │  │                               │
//!   │   └──────────────────────┼──┼─┼──┘                               │
//!   │                          ▼  ▼ ▼                                  │
//!   │   ┌──────────────────────────────────────────────────────────┐   │
//!   │   │  LinkedList<Block<K, V>, S>   (arena over S: Vector)     │   │
//!   │   │                                                          │   │
//!   │   │  head ──► [key_a] ◄──► [key_b] ◄──► [key_c] ◄── tail     │   │
//!   │   │           MRU                        LRU                 │   │
//!   │   └──────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! | Component                | Description                                     |
//! |--------------------------|-------------------------------------------------|
//! | `Block<K, V>`            | List payload: key + value                       |
//! | `LruCache<K, V, S, M>`   | Single-threaded cache over any backends         |
//! | `HeapLruCache<K, V>`     | `AllocVec` + `AllocBTreeMap` (`alloc`)          |
//! | `FxLruCache<K, V>`       | `AllocVec` + `FxMap` (`std`)                    |
//! | `StackLruCache<K, V, N>` | `Array` + `ArrayMap`, no allocation             |
//! | `ConcurrentLruCache`     | `parking_lot::Mutex` wrapper (`concurrency`)    |
//!
//! ## LRU Operations Flow
//!
//! ```text
//!   INSERT new item (cache full, capacity = 3)
//!
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!
//!   insert(D):
//!     1. swap D into the tail node, remove C from map
//!     2. record D in map, move the node to head
//!     3. report Eviction::Evicted(C, c)
//!
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   GET existing item
//!
//!   get(B):
//!     1. map lookup: B → index
//!     2. move_to_front(index), index unchanged
//!
//!     head ──► [B] ◄──► [D] ◄──► [A] ◄── tail
//! ```
//!
//! ## Capacity
//!
//! Capacity is fixed at construction. A capacity of `0` is accepted: such a
//! cache stores nothing and every insert of a new key returns the pair it was
//! given as `Eviction::Evicted`.
//!
//! ## Consistency
//!
//! The map and the list always describe the same entries. If an operation
//! finds them out of step, that is a bug in this module: it is logged at
//! `error` level and the operation panics.
//!
//! ## Example Usage
//!
//! ```
//! use gencache::policy::lru::HeapLruCache;
//! use gencache::traits::{Eviction, Lookup};
//!
//! let mut cache: HeapLruCache<&str, u32> = HeapLruCache::new(2);
//! assert_eq!(cache.insert("a", 1), Ok(Eviction::NoEviction));
//! assert_eq!(cache.insert("b", 2), Ok(Eviction::NoEviction));
//!
//! // Reading "a" makes "b" the least recently used entry.
//! assert_eq!(cache.get(&"a"), Lookup::Hit(&1));
//! assert_eq!(cache.insert("c", 3), Ok(Eviction::Evicted("b", 2)));
//! assert_eq!(cache.get(&"b"), Lookup::Miss);
//! ```

use core::{fmt, mem};
#[cfg(feature = "std")]
use core::hash::Hash;

#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
use tracing::{debug, error, trace};

#[cfg(feature = "alloc")]
use crate::backend::{AllocBTreeMap, AllocVec};
#[cfg(feature = "std")]
use crate::backend::FxMap;
use crate::backend::{Array, ArrayMap, Map, Vector};
use crate::ds::arena::Index;
use crate::ds::linked_list::{LinkedList, ListEntry};
use crate::error::{CacheError, ConfigError, InvariantError, ListError};
#[cfg(feature = "metrics")]
use crate::metrics::{LruMetrics, LruMetricsSnapshot, MetricsSnapshotProvider};
use crate::traits::{Cache, Eviction, Lookup, RecencyCache};

/// Cache entry stored as the payload of a list node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<K, V> {
    pub key: K,
    pub value: V,
}

/// Arena entry type of an LRU cache's node storage.
pub type LruEntry<K, V> = ListEntry<Block<K, V>>;

/// Heap-backed LRU cache with an ordered key map.
#[cfg(feature = "alloc")]
pub type HeapLruCache<K, V> = LruCache<K, V, AllocVec<LruEntry<K, V>>, AllocBTreeMap<K, Index>>;

/// Heap-backed LRU cache with an FxHash key map.
#[cfg(feature = "std")]
pub type FxLruCache<K, V> = LruCache<K, V, AllocVec<LruEntry<K, V>>, FxMap<K, Index>>;

/// Allocation-free LRU cache holding at most `N` entries.
pub type StackLruCache<K, V, const N: usize> =
    LruCache<K, V, Array<LruEntry<K, V>, N>, ArrayMap<K, Index, N>>;

/// Least-recently-used cache over node storage `S` and key map `M`.
pub struct LruCache<K, V, S, M> {
    list: LinkedList<Block<K, V>, S>,
    map: M,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

/// Reports a map/list mismatch and aborts the operation.
#[cold]
#[inline(never)]
#[track_caller]
fn diverged(context: &'static str, detail: &dyn fmt::Debug) -> ! {
    error!(context, ?detail, "lru map and list diverged");
    panic!("lru cache map and list diverged: {context}: {detail:?}");
}

impl<K, V, S, M> LruCache<K, V, S, M>
where
    K: Clone,
    S: Vector<LruEntry<K, V>>,
    M: Map<K, Index>,
{
    /// Creates a cache over caller-supplied backends.
    ///
    /// Fails if either backend already holds entries or has a hard bound
    /// below `capacity`.
    ///
    /// # Example
    ///
    /// ```
    /// use gencache::backend::{Array, ArrayMap};
    /// use gencache::error::ConfigError;
    /// use gencache::policy::lru::LruCache;
    ///
    /// let cache = LruCache::<u8, u8, _, _>::with_backends(
    ///     4,
    ///     Array::<_, 4>::new(),
    ///     ArrayMap::<_, _, 4>::new(),
    /// )
    /// .unwrap();
    /// assert_eq!(cache.capacity(), 4);
    ///
    /// let err = LruCache::<u8, u8, _, _>::with_backends(
    ///     8,
    ///     Array::<_, 8>::new(),
    ///     ArrayMap::<_, _, 4>::new(),
    /// )
    /// .unwrap_err();
    /// assert_eq!(err, ConfigError::MapTooSmall { capacity: 8, limit: 4 });
    /// ```
    pub fn with_backends(capacity: usize, storage: S, map: M) -> Result<Self, ConfigError> {
        if !storage.is_empty() {
            return Err(ConfigError::StorageNotEmpty { len: storage.len() });
        }
        if !map.is_empty() {
            return Err(ConfigError::MapNotEmpty { len: map.len() });
        }
        if let Some(limit) = storage.max_len() {
            if limit < capacity {
                return Err(ConfigError::StorageTooSmall { capacity, limit });
            }
        }
        if let Some(limit) = map.max_len() {
            if limit < capacity {
                return Err(ConfigError::MapTooSmall { capacity, limit });
            }
        }
        Ok(Self::from_parts(capacity, storage, map))
    }

    /// Creates a cache over default-constructed backends.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError>
    where
        S: Default,
        M: Default,
    {
        Self::with_backends(capacity, S::default(), M::default())
    }

    /// Callers guarantee both backends are empty and large enough.
    fn from_parts(capacity: usize, storage: S, map: M) -> Self {
        debug!(
            capacity,
            storage_limit = ?storage.max_len(),
            map_limit = ?map.max_len(),
            "created lru cache"
        );
        Self {
            list: LinkedList::with_storage(storage),
            map,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// Updating an existing key never evicts and reports
    /// `Eviction::NoEviction`; the previous value is dropped. Inserting a new
    /// key into a full cache evicts the least recently used entry and reports
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] only when a backend refuses the new entry. The
    /// cache is then left exactly as it was before the call, including the
    /// entry that would have been evicted.
    pub fn insert(&mut self, key: K, value: V) -> Result<Eviction<K, V>, CacheError> {
        if let Some(&id) = self.map.get(&key) {
            self.block_mut(id).value = value;
            self.promote(id);

            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            return Ok(Eviction::NoEviction);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.capacity == 0 {
            trace!("zero-capacity lru cache turned insert into eviction");
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            return Ok(Eviction::Evicted(key, value));
        }

        if self.list.len() >= self.capacity {
            return self.replace_lru(key, value);
        }

        let id = self.list.push_front(Block {
            key: key.clone(),
            value,
        })?;

        match self.map.insert(key, id) {
            Ok(None) => {},
            Ok(Some(previous)) => diverged("key already mapped during insert", &previous),
            Err(err) => {
                if let Err(unlink) = self.list.remove(id) {
                    diverged("rollback of failed map insert", &unlink);
                }
                return Err(CacheError::Map(err));
            },
        }

        Ok(Eviction::NoEviction)
    }

    /// Reads `key`, making it the most recently used entry on a hit.
    pub fn get(&mut self, key: &K) -> Lookup<&V> {
        let Some(&id) = self.map.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return Lookup::Miss;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.promote(id);
        Lookup::Hit(&self.block(id).value)
    }

    /// Mutable variant of [`get`](Self::get); also updates recency.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let Some(&id) = self.map.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.promote(id);
        Some(&mut self.block_mut(id).value)
    }

    /// Reads `key` without touching recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let value = self.map.get(key).map(|&id| &self.block(id).value);

        #[cfg(feature = "metrics")]
        self.metrics.record_peek(value.is_some());

        value
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.map.remove(key)?;
        let block = self
            .list
            .remove(id)
            .unwrap_or_else(|err| diverged("mapped node missing on remove", &err));

        #[cfg(feature = "metrics")]
        self.metrics.record_removal();

        Some(block.value)
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Marks `key` as most recently used without reading it.
    pub fn touch(&mut self, key: &K) -> bool {
        let found = match self.map.get(key) {
            Some(&id) => {
                self.promote(id);
                true
            },
            None => false,
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_touch(found);

        found
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let popped = self.detach_lru();

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru(popped.is_some());

        popped
    }

    /// Returns the entry that the next eviction would remove.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|block| (&block.key, &block.value))
    }

    /// Returns the most recently used entry.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.list.front().map(|block| (&block.key, &block.value))
    }

    /// Position of `key` in recency order, `0` being most recent. O(n).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        let &target = self.map.get(key)?;
        for (rank, (id, _)) in self.list.iter_entries().enumerate() {
            #[cfg(feature = "metrics")]
            self.metrics.record_recency_rank_scan_step();

            if id == target {
                return Some(rank);
            }
        }
        None
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator {
        self.list.iter().map(|block| (&block.key, &block.value))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if inserting a new key would evict.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.list.len() >= self.capacity
    }

    /// Node slots the storage backend holds without growing.
    #[inline]
    pub fn storage_capacity(&self) -> usize {
        self.list.capacity()
    }

    /// Makes room in node storage for the full capacity.
    pub(crate) fn reserve_storage(&mut self) -> Result<(), ListError> {
        self.list.reserve(self.capacity - self.list.len())
    }

    /// Removes every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        debug!(len = self.list.len(), capacity = self.capacity, "clearing lru cache");
        self.list.clear();
        self.map.clear();

        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Checks the list invariants plus agreement between map and list.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;
        if self.map.len() != self.list.len() {
            return Err(InvariantError::new("lru map and list lengths differ"));
        }
        if self.list.len() > self.capacity {
            return Err(InvariantError::new("lru cache holds more entries than its capacity"));
        }
        for (id, block) in self.list.iter_entries() {
            if self.map.get(&block.key) != Some(&id) {
                return Err(InvariantError::new("lru map does not point at the node holding its key"));
            }
        }
        Ok(())
    }

    /// Stores `key` in the least recently used node and moves it to the
    /// front. The node is rewritten in place, so a full cache never asks the
    /// storage backend for a slot.
    fn replace_lru(&mut self, key: K, value: V) -> Result<Eviction<K, V>, CacheError> {
        let Some(id) = self.list.back_index() else {
            diverged("full cache has no tail node", &self.capacity);
        };
        let old = mem::replace(
            self.block_mut(id),
            Block {
                key: key.clone(),
                value,
            },
        );
        if self.map.remove(&old.key) != Some(id) {
            diverged("tail node has no map entry", &id);
        }

        match self.map.insert(key, id) {
            Ok(None) => {},
            Ok(Some(previous)) => diverged("key already mapped during eviction", &previous),
            Err(err) => {
                let restored = old.key.clone();
                *self.block_mut(id) = old;
                if self.map.insert(restored, id).is_err() {
                    diverged("evicted key could not be mapped again", &id);
                }
                return Err(CacheError::Map(err));
            },
        }

        self.promote(id);
        trace!(len = self.list.len(), "evicted least recently used entry");

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        Ok(Eviction::Evicted(old.key, old.value))
    }

    fn detach_lru(&mut self) -> Option<(K, V)> {
        let Block { key, value } = self.list.pop_back().ok()?;
        if self.map.remove(&key).is_none() {
            diverged("tail node has no map entry", &self.list.len());
        }
        Some((key, value))
    }

    fn promote(&mut self, id: Index) {
        if let Err(err) = self.list.move_to_front(id) {
            diverged("mapped node missing on promote", &err);
        }
    }

    fn block(&self, id: Index) -> &Block<K, V> {
        match self.list.get(id) {
            Ok(block) => block,
            Err(err) => diverged("mapped node missing on read", &err),
        }
    }

    fn block_mut(&mut self, id: Index) -> &mut Block<K, V> {
        match self.list.get_mut(id) {
            Ok(block) => block,
            Err(err) => diverged("mapped node missing on write", &err),
        }
    }
}

#[cfg(feature = "alloc")]
impl<K, V> LruCache<K, V, AllocVec<LruEntry<K, V>>, AllocBTreeMap<K, Index>>
where
    K: Ord + Clone,
{
    /// Creates a heap-backed cache. Storage grows on demand up to `capacity`.
    pub fn new(capacity: usize) -> Self {
        Self::from_parts(capacity, AllocVec::new(), AllocBTreeMap::new())
    }

    /// Creates a heap-backed cache with node storage for `capacity` entries
    /// allocated up front.
    pub fn with_preallocation(capacity: usize) -> Self {
        Self::from_parts(capacity, AllocVec::with_capacity(capacity), AllocBTreeMap::new())
    }
}

#[cfg(feature = "std")]
impl<K, V> LruCache<K, V, AllocVec<LruEntry<K, V>>, FxMap<K, Index>>
where
    K: Eq + Hash + Clone,
{
    /// Creates a heap-backed cache keyed through an FxHash map.
    pub fn new(capacity: usize) -> Self {
        Self::from_parts(capacity, AllocVec::new(), FxMap::new())
    }

    /// Creates a heap-backed cache with node storage and map buckets for
    /// `capacity` entries allocated up front.
    pub fn with_preallocation(capacity: usize) -> Self {
        Self::from_parts(
            capacity,
            AllocVec::with_capacity(capacity),
            FxMap::with_capacity(capacity),
        )
    }
}

impl<K, V, const N: usize> LruCache<K, V, Array<LruEntry<K, V>, N>, ArrayMap<K, Index, N>>
where
    K: Ord + Clone,
{
    /// Creates an allocation-free cache of capacity `N`.
    pub fn new() -> Self {
        Self::from_parts(N, Array::new(), ArrayMap::new())
    }
}

impl<K, V, const N: usize> Default
    for LruCache<K, V, Array<LruEntry<K, V>, N>, ArrayMap<K, Index, N>>
where
    K: Ord + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S, M> LruCache<K, V, S, M>
where
    K: Clone,
    S: Vector<LruEntry<K, V>>,
    M: Map<K, Index>,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.snapshot(self.list.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S, M> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V, S, M>
where
    K: Clone,
    S: Vector<LruEntry<K, V>>,
    M: Map<K, Index>,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V, S, M> Cache<K, V> for LruCache<K, V, S, M>
where
    K: Clone,
    S: Vector<LruEntry<K, V>>,
    M: Map<K, Index>,
{
    type Error = CacheError;

    #[inline]
    fn insert(&mut self, key: K, value: V) -> Result<Eviction<K, V>, CacheError> {
        LruCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Lookup<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn peek(&self, key: &K) -> Option<&V> {
        LruCache::peek(self, key)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LruCache::clear(self);
    }
}

impl<K, V, S, M> RecencyCache<K, V> for LruCache<K, V, S, M>
where
    K: Clone,
    S: Vector<LruEntry<K, V>>,
    M: Map<K, Index>,
{
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

impl<K, V, S, M> fmt::Debug for LruCache<K, V, S, M>
where
    K: Clone + fmt::Debug,
    V: fmt::Debug,
    S: Vector<LruEntry<K, V>>,
    M: Map<K, Index>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("entries", &DebugEntries(self))
            .finish()
    }
}

struct DebugEntries<'a, K, V, S, M>(&'a LruCache<K, V, S, M>);

impl<K, V, S, M> fmt::Debug for DebugEntries<'_, K, V, S, M>
where
    K: Clone + fmt::Debug,
    V: fmt::Debug,
    S: Vector<LruEntry<K, V>>,
    M: Map<K, Index>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

/// Thread-safe LRU cache: one `parking_lot::Mutex` around a whole
/// [`LruCache`]. Cloning shares the same cache.
///
/// Every read moves an entry in recency order, so reads and writes take the
/// same exclusive lock. Values are cloned out; wrap large values in `Arc`.
///
/// # Example
///
/// ```
/// use gencache::policy::lru::ConcurrentLruCache;
/// use gencache::traits::Lookup;
///
/// let cache = ConcurrentLruCache::<u32, String, _, _>::new(100);
/// let handle = cache.clone();
///
/// std::thread::spawn(move || {
///     handle.insert(1, "one".to_string()).unwrap();
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(cache.get(&1), Lookup::Hit("one".to_string()));
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentLruCache<K, V, S, M> {
    inner: Arc<Mutex<LruCache<K, V, S, M>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V, S, M> Clone for ConcurrentLruCache<K, V, S, M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V, AllocVec<LruEntry<K, V>>, AllocBTreeMap<K, Index>>
where
    K: Ord + Clone,
{
    /// Creates a shared heap-backed cache.
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(HeapLruCache::new(capacity))
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, S, M> From<LruCache<K, V, S, M>> for ConcurrentLruCache<K, V, S, M> {
    fn from(cache: LruCache<K, V, S, M>) -> Self {
        Self::from_cache(cache)
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, S, M> ConcurrentLruCache<K, V, S, M> {
    /// Wraps an existing cache.
    pub fn from_cache(cache: LruCache<K, V, S, M>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, S, M> ConcurrentLruCache<K, V, S, M>
where
    K: Clone,
    S: Vector<LruEntry<K, V>>,
    M: Map<K, Index>,
{
    /// Creates a shared cache over caller-supplied backends.
    pub fn with_backends(capacity: usize, storage: S, map: M) -> Result<Self, ConfigError> {
        LruCache::with_backends(capacity, storage, map).map(Self::from_cache)
    }

    pub fn insert(&self, key: K, value: V) -> Result<Eviction<K, V>, CacheError> {
        self.inner.lock().insert(key, value)
    }

    /// Reads `key`, updating recency, and clones the value out.
    pub fn get(&self, key: &K) -> Lookup<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Like [`get`](Self::get), but returns `None` instead of waiting when
    /// another thread holds the lock.
    pub fn try_get(&self, key: &K) -> Option<Lookup<V>>
    where
        V: Clone,
    {
        let mut cache = self.inner.try_lock()?;
        Some(cache.get(key).cloned())
    }

    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    pub fn touch(&self, key: &K) -> bool {
        self.inner.lock().touch(key)
    }

    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.lock().pop_lru()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Runs `f` with exclusive access to the cache, for multi-step
    /// operations that must not interleave with other threads.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut LruCache<K, V, S, M>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<K, V, S, M> ConcurrentLruCache<K, V, S, M>
where
    K: Clone,
    S: Vector<LruEntry<K, V>>,
    M: Map<K, Index>,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, S, M> fmt::Debug for ConcurrentLruCache<K, V, S, M>
where
    K: Clone,
    S: Vector<LruEntry<K, V>>,
    M: Map<K, Index>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u8, u16),
        Get(u8),
        Remove(u8),
        Touch(u8),
        PopLru,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0u8..16, any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
            3 => (0u8..16).prop_map(Op::Get),
            1 => (0u8..16).prop_map(Op::Remove),
            1 => (0u8..16).prop_map(Op::Touch),
            1 => Just(Op::PopLru),
        ]
    }

    proptest! {
        /// Property: the cache matches a Vec model kept in MRU-first order.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_recency_model(
            capacity in 0usize..6,
            ops in prop::collection::vec(op(), 0..200)
        ) {
            let mut cache: HeapLruCache<u8, u16> = HeapLruCache::new(capacity);
            let mut model: Vec<(u8, u16)> = Vec::new();

            for op in ops {
                match op {
                    Op::Insert(k, v) => {
                        let expected = if let Some(pos) = model.iter().position(|(mk, _)| *mk == k) {
                            model.remove(pos);
                            model.insert(0, (k, v));
                            Eviction::NoEviction
                        } else if capacity == 0 {
                            Eviction::Evicted(k, v)
                        } else {
                            let evicted = if model.len() == capacity { model.pop() } else { None };
                            model.insert(0, (k, v));
                            Eviction::from(evicted)
                        };
                        prop_assert_eq!(cache.insert(k, v), Ok(expected));
                    },
                    Op::Get(k) => {
                        let expected = match model.iter().position(|(mk, _)| *mk == k) {
                            Some(pos) => {
                                let entry = model.remove(pos);
                                model.insert(0, entry);
                                Lookup::Hit(entry.1)
                            },
                            None => Lookup::Miss,
                        };
                        prop_assert_eq!(cache.get(&k).copied(), expected);
                    },
                    Op::Remove(k) => {
                        let expected = model
                            .iter()
                            .position(|(mk, _)| *mk == k)
                            .map(|pos| model.remove(pos).1);
                        prop_assert_eq!(cache.remove(&k), expected);
                    },
                    Op::Touch(k) => {
                        let found = match model.iter().position(|(mk, _)| *mk == k) {
                            Some(pos) => {
                                let entry = model.remove(pos);
                                model.insert(0, entry);
                                true
                            },
                            None => false,
                        };
                        prop_assert_eq!(cache.touch(&k), found);
                    },
                    Op::PopLru => prop_assert_eq!(cache.pop_lru(), model.pop()),
                }

                prop_assert!(cache.len() <= capacity);
                let order: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
                prop_assert_eq!(&order, &model);
                prop_assert!(cache.check_invariants().is_ok());
            }
        }
    }
}
