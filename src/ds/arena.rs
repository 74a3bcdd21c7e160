//! Generational arena over a pluggable [`Vector`] backend.
//!
//! Values live in slots of the backing storage. Each insert hands out an
//! [`Index`] that pairs the slot with the slot's generation at issue time;
//! removing a value bumps the generation before the slot is recycled, so
//! every handle to the previous occupant is rejected from then on.
//!
//! ## Architecture
//!
//! ```text
//!   storage (V: Vector<Entry<T>>)
//!   ┌──────┬──────────────────────────────────────┐
//!   │ slot │ Entry                                │
//!   ├──────┼──────────────────────────────────────┤
//!   │  0   │ Occupied { generation: 0, value: A } │
//!   │  1   │ Free { generation: 2, next: Some(3) }│ ◄── free_head
//!   │  2   │ Occupied { generation: 1, value: B } │
//!   │  3   │ Free { generation: 1, next: None }   │
//!   └──────┴──────────────────────────────────────┘
//!
//!   Index { slot: 1, generation: 1 } ──► StaleIndex (slot is free, gen 2)
//!   Index { slot: 2, generation: 1 } ──► B
//! ```
//!
//! ## Operations
//! - `insert(value)`: pop the free list, else push a new slot
//! - `remove(index)`: validate, swap in a `Free` entry, thread it on the list
//! - `get(index)` / `get_mut(index)`: validate, borrow
//!
//! All operations are O(1) except `clear` and `iter`.
//!
//! A slot whose generation counter reaches `u64::MAX` is retired instead of
//! recycled, so no generation is ever issued twice for the same slot.

use core::fmt;

use crate::backend::Vector;
use crate::error::{ArenaError, InvariantError};

/// Generation stored in a `Free` entry that is never reused.
const RETIRED: u64 = u64::MAX;

/// Handle to one logical occupant of an arena slot.
///
/// Two indices are equal iff both the slot and the generation match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Index {
    slot: usize,
    generation: u64,
}

impl Index {
    /// Builds an index from its parts. Mostly useful in tests; a forged index
    /// is validated like any other.
    #[inline]
    pub const fn from_raw_parts(slot: usize, generation: u64) -> Self {
        Self { slot, generation }
    }

    #[inline]
    pub const fn slot(self) -> usize {
        self.slot
    }

    #[inline]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.slot, self.generation)
    }
}

/// Per-slot state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<T> {
    /// Slot holds a value issued under `generation`.
    Occupied { generation: u64, value: T },
    /// Slot is free; the next occupant receives `generation`.
    Free {
        generation: u64,
        next_free: Option<usize>,
    },
}

impl<T> Entry<T> {
    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied { .. })
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        match self {
            Self::Occupied { generation, .. } | Self::Free { generation, .. } => *generation,
        }
    }
}

/// Generational arena storing `T` in a `V: Vector<Entry<T>>`.
pub struct Arena<T, V> {
    storage: V,
    free_head: Option<usize>,
    len: usize,
    retired: usize,
    _marker: core::marker::PhantomData<T>,
}

impl<T, V> Arena<T, V>
where
    V: Vector<Entry<T>>,
{
    /// Creates an arena over `storage`, discarding anything it held.
    pub fn with_storage(mut storage: V) -> Self {
        storage.clear();
        Self {
            storage,
            free_head: None,
            len: 0,
            retired: 0,
            _marker: core::marker::PhantomData,
        }
    }

    /// Creates an arena over default-constructed storage.
    pub fn new() -> Self
    where
        V: Default,
    {
        Self::with_storage(V::default())
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots the storage holds without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Hard upper bound on the number of slots, if the storage is fixed.
    #[inline]
    pub fn max_len(&self) -> Option<usize> {
        self.storage.max_len()
    }

    /// Number of slots ever materialized (occupied, free and retired).
    #[inline]
    pub fn slots(&self) -> usize {
        self.storage.len()
    }

    /// Makes room for `additional` more values without reallocating.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ArenaError> {
        let free = self.storage.len() - self.len - self.retired;
        if additional <= free {
            return Ok(());
        }
        self.storage
            .reserve(additional - free)
            .map_err(ArenaError::StorageExhausted)
    }

    /// Stores `value` and returns its handle.
    pub fn insert(&mut self, value: T) -> Result<Index, ArenaError> {
        if let Some(slot) = self.free_head {
            let len = self.storage.len();
            let entry = self
                .storage
                .get_mut(slot)
                .ok_or(ArenaError::OutOfBounds { slot, len })?;
            let (generation, next_free) = match *entry {
                Entry::Free {
                    generation,
                    next_free,
                } => (generation, next_free),
                Entry::Occupied { generation, .. } => {
                    return Err(ArenaError::StaleIndex(Index::from_raw_parts(
                        slot, generation,
                    )));
                },
            };
            *entry = Entry::Occupied { generation, value };
            self.free_head = next_free;
            self.len += 1;
            return Ok(Index::from_raw_parts(slot, generation));
        }

        let slot = self.storage.len();
        self.storage
            .push(Entry::Occupied {
                generation: 0,
                value,
            })
            .map_err(ArenaError::StorageExhausted)?;
        self.len += 1;
        Ok(Index::from_raw_parts(slot, 0))
    }

    fn validate(&self, index: Index) -> Result<(), ArenaError> {
        match self.storage.get(index.slot) {
            None => Err(ArenaError::OutOfBounds {
                slot: index.slot,
                len: self.storage.len(),
            }),
            Some(Entry::Occupied { generation, .. }) if *generation == index.generation => Ok(()),
            Some(_) => Err(ArenaError::StaleIndex(index)),
        }
    }

    /// Removes the value at `index`, returning ownership of it.
    pub fn remove(&mut self, index: Index) -> Result<T, ArenaError> {
        self.validate(index)?;

        let generation = index.generation.saturating_add(1);
        let retire = generation == RETIRED;
        let freed = Entry::Free {
            generation,
            next_free: if retire { None } else { self.free_head },
        };
        let old = self
            .storage
            .set(index.slot, freed)
            .map_err(|_| ArenaError::StaleIndex(index))?;

        if retire {
            self.retired += 1;
        } else {
            self.free_head = Some(index.slot);
        }
        self.len -= 1;

        match old {
            Entry::Occupied { value, .. } => Ok(value),
            Entry::Free { .. } => Err(ArenaError::StaleIndex(index)),
        }
    }

    /// Returns the value at `index`.
    pub fn get(&self, index: Index) -> Result<&T, ArenaError> {
        match self.storage.get(index.slot) {
            None => Err(ArenaError::OutOfBounds {
                slot: index.slot,
                len: self.storage.len(),
            }),
            Some(Entry::Occupied { generation, value }) if *generation == index.generation => {
                Ok(value)
            },
            Some(_) => Err(ArenaError::StaleIndex(index)),
        }
    }

    /// Returns a mutable reference to the value at `index`.
    pub fn get_mut(&mut self, index: Index) -> Result<&mut T, ArenaError> {
        let len = self.storage.len();
        match self.storage.get_mut(index.slot) {
            None => Err(ArenaError::OutOfBounds {
                slot: index.slot,
                len,
            }),
            Some(Entry::Occupied { generation, value }) if *generation == index.generation => {
                Ok(value)
            },
            Some(_) => Err(ArenaError::StaleIndex(index)),
        }
    }

    /// Returns `true` if `index` refers to a live value.
    #[inline]
    pub fn contains(&self, index: Index) -> bool {
        self.validate(index).is_ok()
    }

    /// Frees every slot, bumping each generation so earlier handles go stale.
    ///
    /// Storage is kept; slots are reused lowest first afterwards.
    pub fn clear(&mut self) {
        let mut next_free = None;
        let mut retired = 0;

        for slot in (0..self.storage.len()).rev() {
            let Some(entry) = self.storage.get_mut(slot) else {
                continue;
            };
            let generation = match *entry {
                Entry::Occupied { generation, .. } => generation.saturating_add(1),
                Entry::Free { generation, .. } => generation,
            };
            if generation == RETIRED {
                *entry = Entry::Free {
                    generation,
                    next_free: None,
                };
                retired += 1;
            } else {
                *entry = Entry::Free {
                    generation,
                    next_free,
                };
                next_free = Some(slot);
            }
        }

        self.free_head = next_free;
        self.len = 0;
        self.retired = retired;
    }

    /// Iterates live values in slot order.
    pub fn iter(&self) -> ArenaIter<'_, T, V> {
        ArenaIter {
            arena: self,
            slot: 0,
            remaining: self.len,
        }
    }

    /// Checks free-list and occupancy bookkeeping.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let slots = self.storage.len();
        let occupied = (0..slots)
            .filter(|&slot| self.storage.get(slot).is_some_and(Entry::is_occupied))
            .count();
        if occupied != self.len {
            return Err(InvariantError::new("arena len does not match occupied slots"));
        }

        let mut free = 0usize;
        let mut cursor = self.free_head;
        while let Some(slot) = cursor {
            free += 1;
            if free > slots {
                return Err(InvariantError::new("arena free list has a cycle"));
            }
            cursor = match self.storage.get(slot) {
                Some(Entry::Free { next_free, .. }) => *next_free,
                Some(Entry::Occupied { .. }) => {
                    return Err(InvariantError::new("arena free list reaches an occupied slot"));
                },
                None => return Err(InvariantError::new("arena free list leaves storage")),
            };
        }

        if occupied + free + self.retired != slots {
            return Err(InvariantError::new("arena slots are neither occupied nor free"));
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &V {
        &self.storage
    }

    #[cfg(test)]
    pub(crate) fn storage_mut(&mut self) -> &mut V {
        &mut self.storage
    }
}

impl<T, V> Default for Arena<T, V>
where
    V: Vector<Entry<T>> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> fmt::Debug for Arena<T, V>
where
    T: fmt::Debug,
    V: Vector<Entry<T>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over `(Index, &T)` in slot order.
pub struct ArenaIter<'a, T, V> {
    arena: &'a Arena<T, V>,
    slot: usize,
    remaining: usize,
}

impl<'a, T, V> Iterator for ArenaIter<'a, T, V>
where
    V: Vector<Entry<T>>,
{
    type Item = (Index, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            let slot = self.slot;
            self.slot += 1;
            match self.arena.storage.get(slot)? {
                Entry::Occupied { generation, value } => {
                    self.remaining -= 1;
                    return Some((Index::from_raw_parts(slot, *generation), value));
                },
                Entry::Free { .. } => continue,
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, V> ExactSizeIterator for ArenaIter<'_, T, V> where V: Vector<Entry<T>> {}
