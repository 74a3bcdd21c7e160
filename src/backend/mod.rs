//! Storage backends for the arena and the cache's key map.
//!
//! The core never allocates on its own. Node storage goes through a
//! [`Vector`] and the key-to-node mapping through a [`Map`]; both are small
//! capability traits so a fixed, allocation-free backend and a growable heap
//! backend satisfy the same contract.
//!
//! ## Key Components
//!
//! | Backend               | Trait    | Bound        | Feature  |
//! |-----------------------|----------|--------------|----------|
//! | [`Array<T, N>`]       | `Vector` | fixed `N`    | -        |
//! | `AllocVec<T>`         | `Vector` | growable     | `alloc`  |
//! | [`ArrayMap<K, V, N>`] | `Map`    | fixed `N`    | -        |
//! | `AllocBTreeMap<K, V>` | `Map`    | growable     | `alloc`  |
//! | `FxMap<K, V>`         | `Map`    | growable     | `std`    |
//!
//! Fixed backends report [`BackendError::Full`] instead of growing.

pub mod array;
pub mod array_map;

#[cfg(feature = "alloc")]
pub mod alloc_vec;
#[cfg(feature = "alloc")]
pub mod btree_map;
#[cfg(feature = "std")]
pub mod fx_map;

pub use array::Array;
pub use array_map::ArrayMap;

#[cfg(feature = "alloc")]
pub use alloc_vec::AllocVec;
#[cfg(feature = "alloc")]
pub use btree_map::AllocBTreeMap;
#[cfg(feature = "std")]
pub use fx_map::FxMap;

use crate::error::BackendError;

/// Indexed, append-only-or-resizable sequence.
pub trait Vector<T> {
    /// Number of elements currently stored.
    fn len(&self) -> usize;

    /// Returns `true` if no elements are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of elements that fit without growing.
    fn capacity(&self) -> usize;

    /// Hard upper bound on `len`, or `None` if the storage can always grow.
    fn max_len(&self) -> Option<usize>;

    /// Returns the element at `index`.
    fn get(&self, index: usize) -> Option<&T>;

    /// Returns a mutable reference to the element at `index`.
    fn get_mut(&mut self, index: usize) -> Option<&mut T>;

    /// Replaces the element at `index`, returning the previous one.
    fn set(&mut self, index: usize, value: T) -> Result<T, BackendError> {
        let len = self.len();
        match self.get_mut(index) {
            Some(slot) => Ok(core::mem::replace(slot, value)),
            None => Err(BackendError::OutOfBounds { index, len }),
        }
    }

    /// Appends an element.
    fn push(&mut self, value: T) -> Result<(), BackendError>;

    /// Makes room for `additional` more elements.
    fn reserve(&mut self, additional: usize) -> Result<(), BackendError>;

    /// Removes every element.
    fn clear(&mut self);
}

/// Key-to-value associative store.
pub trait Map<K, V> {
    /// Inserts a pair, returning the value previously stored under `key`.
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>, BackendError>;

    /// Returns the value stored under `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns a mutable reference to the value stored under `key`.
    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    /// Removes and returns the value stored under `key`.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Returns `true` if `key` is present.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Number of stored pairs.
    fn len(&self) -> usize;

    /// Returns `true` if no pairs are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hard upper bound on `len`, or `None` if the map can always grow.
    fn max_len(&self) -> Option<usize>;

    /// Removes every pair.
    fn clear(&mut self);
}
