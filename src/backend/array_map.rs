//! Fixed-capacity sorted map stored inline.
//!
//! Pairs live in key order in an `[Option<(K, V)>; N]`; lookups are binary
//! searches and inserts/removes shift the tail of the occupied prefix. Good
//! for the small `N` typical of allocation-free caches.
//!
//! ```text
//!   slots: [ (1,a) | (4,b) | (9,c) | None | None ]
//!           └──── len = 3, sorted ────┘
//! ```

use core::cmp::Ordering;
use core::fmt;

use crate::backend::Map;
use crate::error::BackendError;

/// [`Map`] holding at most `N` pairs, ordered by key.
pub struct ArrayMap<K, V, const N: usize> {
    slots: [Option<(K, V)>; N],
    len: usize,
}

impl<K, V, const N: usize> ArrayMap<K, V, N> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            len: 0,
        }
    }

    /// Iterates pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots[..self.len]
            .iter()
            .filter_map(|slot| slot.as_ref().map(|(k, v)| (k, v)))
    }
}

impl<K: Ord, V, const N: usize> ArrayMap<K, V, N> {
    fn search(&self, key: &K) -> Result<usize, usize> {
        self.slots[..self.len].binary_search_by(|slot| match slot {
            Some((k, _)) => k.cmp(key),
            None => Ordering::Greater,
        })
    }
}

impl<K, V, const N: usize> Default for ArrayMap<K, V, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, const N: usize> fmt::Debug for ArrayMap<K, V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V, const N: usize> Map<K, V> for ArrayMap<K, V, N> {
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>, BackendError> {
        match self.search(&key) {
            Ok(pos) => {
                let previous = self.slots[pos].replace((key, value));
                Ok(previous.map(|(_, v)| v))
            },
            Err(pos) => {
                if self.len == N {
                    return Err(BackendError::Full { capacity: N });
                }
                self.slots[self.len] = Some((key, value));
                self.slots[pos..=self.len].rotate_right(1);
                self.len += 1;
                Ok(None)
            },
        }
    }

    fn get(&self, key: &K) -> Option<&V> {
        let pos = self.search(key).ok()?;
        self.slots[pos].as_ref().map(|(_, v)| v)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let pos = self.search(key).ok()?;
        self.slots[pos].as_mut().map(|(_, v)| v)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let pos = self.search(key).ok()?;
        let (_, value) = self.slots[pos].take()?;
        self.slots[pos..self.len].rotate_left(1);
        self.len -= 1;
        Some(value)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn max_len(&self) -> Option<usize> {
        Some(N)
    }

    fn clear(&mut self) {
        for slot in &mut self.slots[..self.len] {
            *slot = None;
        }
        self.len = 0;
    }
}
