//! Growable hash map using `rustc_hash::FxHashMap`.
//!
//! FxHash is fast for small integer-like keys, which is what cache keys
//! usually are. Requires `K: Eq + Hash` instead of `Ord`.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::backend::Map;
use crate::error::BackendError;

/// [`Map`] over an `FxHashMap<K, V>`; never reports `Full`.
#[derive(Debug, Clone)]
pub struct FxMap<K, V> {
    map: FxHashMap<K, V>,
}

impl<K, V> FxMap<K, V> {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }
}

impl<K, V> Default for FxMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> Map<K, V> for FxMap<K, V> {
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>, BackendError> {
        Ok(self.map.insert(key, value))
    }

    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    #[inline]
    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.map.get_mut(key)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        self.map.remove(key)
    }

    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn max_len(&self) -> Option<usize> {
        None
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}
