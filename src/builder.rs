//! Builder for LRU caches.
//!
//! Gathers construction parameters in one place and picks the backends, so
//! callers that do not care about storage never name an `AllocVec` or a map.
//!
//! ## Example
//!
//! ```rust
//! use gencache::builder::LruCacheBuilder;
//! use gencache::traits::Lookup;
//!
//! let mut cache = LruCacheBuilder::new(100).preallocate(true).build::<u64, String>();
//! cache.insert(1, "hello".to_string()).unwrap();
//! assert_eq!(cache.get(&1), Lookup::Hit(&"hello".to_string()));
//! ```

#[cfg(feature = "std")]
use core::hash::Hash;

#[cfg(feature = "concurrency")]
use crate::backend::{AllocBTreeMap, AllocVec};
use crate::backend::{Map, Vector};
use crate::ds::arena::Index;
use crate::error::ConfigError;
#[cfg(feature = "concurrency")]
use crate::policy::lru::ConcurrentLruCache;
#[cfg(feature = "std")]
use crate::policy::lru::FxLruCache;
#[cfg(feature = "alloc")]
use crate::policy::lru::HeapLruCache;
use crate::policy::lru::{LruCache, LruEntry};

/// Construction parameters for an LRU cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LruCacheBuilder {
    capacity: usize,
    preallocate: bool,
}

impl LruCacheBuilder {
    /// Starts a builder for a cache holding at most `capacity` entries.
    ///
    /// `0` is a valid capacity; the resulting cache stores nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            preallocate: false,
        }
    }

    /// Allocates node storage for the full capacity up front instead of
    /// growing it as entries arrive. Only affects heap-backed builds.
    pub fn preallocate(mut self, preallocate: bool) -> Self {
        self.preallocate = preallocate;
        self
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Builds a heap-backed cache with an ordered key map (`K: Ord`).
    #[cfg(feature = "alloc")]
    pub fn build<K, V>(self) -> HeapLruCache<K, V>
    where
        K: Ord + Clone,
    {
        if self.preallocate {
            HeapLruCache::with_preallocation(self.capacity)
        } else {
            HeapLruCache::new(self.capacity)
        }
    }

    /// Builds a heap-backed cache with a hash key map (`K: Hash + Eq`).
    #[cfg(feature = "std")]
    pub fn build_fx<K, V>(self) -> FxLruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        if self.preallocate {
            FxLruCache::with_preallocation(self.capacity)
        } else {
            FxLruCache::new(self.capacity)
        }
    }

    /// Builds a thread-safe heap-backed cache.
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<K, V>(
        self,
    ) -> ConcurrentLruCache<K, V, AllocVec<LruEntry<K, V>>, AllocBTreeMap<K, Index>>
    where
        K: Ord + Clone,
    {
        ConcurrentLruCache::from_cache(self.build())
    }

    /// Builds a cache over caller-supplied backends, validating that both
    /// are empty and can hold `capacity` entries.
    ///
    /// With `preallocate` set, node storage is reserved for `capacity`
    /// entries once the backends pass validation; a refused reservation is
    /// reported as [`ConfigError::Preallocation`].
    pub fn try_build_with<K, V, S, M>(
        self,
        storage: S,
        map: M,
    ) -> Result<LruCache<K, V, S, M>, ConfigError>
    where
        K: Clone,
        S: Vector<LruEntry<K, V>>,
        M: Map<K, Index>,
    {
        let mut cache = LruCache::with_backends(self.capacity, storage, map)?;
        if self.preallocate {
            cache.reserve_storage().map_err(ConfigError::Preallocation)?;
        }
        Ok(cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AllocBTreeMap, AllocVec, Array, ArrayMap};
    use crate::error::{ArenaError, BackendError, ListError};
    use crate::traits::{Cache, Eviction, Lookup};

    #[test]
    fn build_heap_cache() {
        let mut cache = LruCacheBuilder::new(2).build::<u64, String>();
        assert_eq!(cache.capacity(), 2);
        cache.insert(1, "one".to_string()).unwrap();
        cache.insert(2, "two".to_string()).unwrap();
        assert_eq!(
            cache.insert(3, "three".to_string()),
            Ok(Eviction::Evicted(1, "one".to_string()))
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn preallocated_build_reserves_storage() {
        let builder = LruCacheBuilder::new(16).preallocate(true);
        let mut heap = builder.build::<u32, u32>();
        let mut fx = builder.build_fx::<u32, u32>();
        for k in 0..20 {
            assert_eq!(heap.insert(k, k), fx.insert(k, k));
        }
        assert_eq!(heap.len(), 16);
        assert_eq!(fx.get(&19), Lookup::Hit(&19));
    }

    #[cfg(feature = "std")]
    #[test]
    fn builds_through_the_cache_trait() {
        fn exercise<C: Cache<u8, u8>>(mut cache: C) -> usize {
            for k in 0..10 {
                let _ = cache.insert(k, k);
            }
            cache.len()
        }
        assert_eq!(exercise(LruCacheBuilder::new(3).build::<u8, u8>()), 3);
        assert_eq!(exercise(LruCacheBuilder::new(0).build_fx::<u8, u8>()), 0);
    }

    #[test]
    fn try_build_with_fixed_backends() {
        let cache = LruCacheBuilder::new(4)
            .try_build_with::<u8, u8, _, _>(Array::<_, 4>::new(), ArrayMap::<_, _, 4>::new())
            .unwrap();
        assert_eq!(cache.capacity(), 4);

        let err = LruCacheBuilder::new(5)
            .preallocate(true)
            .try_build_with::<u8, u8, _, _>(Array::<_, 4>::new(), ArrayMap::<_, _, 8>::new())
            .unwrap_err();
        assert_eq!(err, ConfigError::StorageTooSmall { capacity: 5, limit: 4 });
    }

    #[test]
    fn try_build_with_growable_storage_and_fixed_map() {
        let mut cache = LruCacheBuilder::new(2)
            .preallocate(true)
            .try_build_with::<u8, u8, _, _>(AllocVec::new(), ArrayMap::<_, _, 2>::new())
            .unwrap();
        cache.insert(1, 1).unwrap();
        cache.insert(2, 2).unwrap();
        assert_eq!(cache.insert(3, 3), Ok(Eviction::Evicted(1, 1)));
    }

    #[test]
    fn heap_builds_without_hash_map() {
        let mut cache = LruCacheBuilder::new(3).preallocate(true).build::<u8, u8>();
        for k in 0..10 {
            cache.insert(k, k).unwrap();
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.peek_lru(), Some((&7, &7)));
    }

    #[test]
    fn try_build_with_preallocates_growable_storage() {
        let cache = LruCacheBuilder::new(32)
            .preallocate(true)
            .try_build_with::<u8, u8, _, _>(AllocVec::new(), AllocBTreeMap::new())
            .unwrap();
        assert!(cache.storage_capacity() >= 32);
        assert!(cache.is_empty());
    }

    #[test]
    fn try_build_with_reports_refused_preallocation() {
        let err = LruCacheBuilder::new(4)
            .preallocate(true)
            .try_build_with::<u8, u8, _, _>(
                Capped::new(AllocVec::<LruEntry<u8, u8>>::new(), 2),
                ArrayMap::<_, _, 4>::new(),
            )
            .unwrap_err();
        let full = ArenaError::StorageExhausted(BackendError::Full { capacity: 2 });
        assert_eq!(err, ConfigError::Preallocation(ListError::Exhausted(full)));
    }

    /// Growable storage that refuses to reserve past `limit` slots.
    struct Capped<V> {
        inner: V,
        limit: usize,
    }

    impl<V> Capped<V> {
        fn new(inner: V, limit: usize) -> Self {
            Self { inner, limit }
        }
    }

    impl<T, V: Vector<T>> Vector<T> for Capped<V> {
        fn len(&self) -> usize {
            self.inner.len()
        }

        fn capacity(&self) -> usize {
            self.inner.capacity()
        }

        fn max_len(&self) -> Option<usize> {
            None
        }

        fn get(&self, index: usize) -> Option<&T> {
            self.inner.get(index)
        }

        fn get_mut(&mut self, index: usize) -> Option<&mut T> {
            self.inner.get_mut(index)
        }

        fn push(&mut self, value: T) -> Result<(), BackendError> {
            self.inner.push(value)
        }

        fn reserve(&mut self, additional: usize) -> Result<(), BackendError> {
            if self.inner.len() + additional > self.limit {
                return Err(BackendError::Full {
                    capacity: self.limit,
                });
            }
            self.inner.reserve(additional)
        }

        fn clear(&mut self) {
            self.inner.clear();
        }
    }

    #[cfg(feature = "concurrency")]
    #[test]
    fn build_concurrent_cache() {
        let cache = LruCacheBuilder::new(8).build_concurrent::<u32, u32>();
        cache.insert(1, 1).unwrap();
        assert_eq!(cache.get(&1), Lookup::Hit(1));
        assert_eq!(cache.capacity(), 8);
    }
}
