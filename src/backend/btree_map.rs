//! Growable ordered map backed by `alloc::collections::BTreeMap`.

use alloc::collections::BTreeMap;

use crate::backend::Map;
use crate::error::BackendError;

/// [`Map`] over a heap `BTreeMap<K, V>`; never reports `Full`.
#[derive(Debug, Clone)]
pub struct AllocBTreeMap<K, V> {
    map: BTreeMap<K, V>,
}

impl<K, V> AllocBTreeMap<K, V> {
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Wraps an existing `BTreeMap`.
    pub fn with_btree_map(map: BTreeMap<K, V>) -> Self {
        Self { map }
    }
}

impl<K, V> Default for AllocBTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Map<K, V> for AllocBTreeMap<K, V> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::conformance;

    #[test]
    fn btree_map_conformance() {
        conformance::map_roundtrip(AllocBTreeMap::new(), 10);
    }
}
