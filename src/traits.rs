//! # Cache Trait Hierarchy
//!
//! Policy-independent cache interface plus the outcome types every policy
//! reports through.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────────────┐
//!   │                  Cache<K, V>                    │
//!   │                                                 │
//!   │  insert(&mut, K, V) → Result<Eviction<K, V>>    │
//!   │  get(&mut, &K)      → Lookup<&V>                │
//!   │  peek(&, &K)        → Option<&V>                │
//!   │  remove(&mut, &K)   → Option<V>                 │
//!   │  contains / len / capacity / is_full / clear    │
//!   └────────────────────────┬────────────────────────┘
//!                            │
//!                            ▼
//!   ┌─────────────────────────────────────────────────┐
//!   │               RecencyCache<K, V>                │
//!   │                                                 │
//!   │  pop_lru()          → Option<(K, V)>            │
//!   │  peek_lru()         → Option<(&K, &V)>          │
//!   │  touch(&K)          → bool                      │
//!   │  recency_rank(&K)   → Option<usize>             │
//!   └─────────────────────────────────────────────────┘
//! ```
//!
//! Hits, misses and evictions are ordinary outcomes, reported through
//! [`Lookup`] and [`Eviction`]. The error channel is reserved for backend
//! failures such as a full fixed-capacity map.

/// Outcome of an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eviction<K, V> {
    /// Nothing left the cache.
    NoEviction,
    /// This pair was pushed out to make room.
    Evicted(K, V),
}

impl<K, V> Eviction<K, V> {
    #[inline]
    pub fn is_evicted(&self) -> bool {
        matches!(self, Eviction::Evicted(..))
    }

    /// Returns the evicted pair, if any.
    #[inline]
    pub fn into_option(self) -> Option<(K, V)> {
        match self {
            Eviction::Evicted(key, value) => Some((key, value)),
            Eviction::NoEviction => None,
        }
    }
}

impl<K, V> From<Option<(K, V)>> for Eviction<K, V> {
    fn from(evicted: Option<(K, V)>) -> Self {
        match evicted {
            Some((key, value)) => Eviction::Evicted(key, value),
            None => Eviction::NoEviction,
        }
    }
}

/// Outcome of a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup<V> {
    Hit(V),
    Miss,
}

impl<V> Lookup<V> {
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }

    #[inline]
    pub fn is_miss(&self) -> bool {
        matches!(self, Lookup::Miss)
    }

    #[inline]
    pub fn into_option(self) -> Option<V> {
        match self {
            Lookup::Hit(value) => Some(value),
            Lookup::Miss => None,
        }
    }

    #[inline]
    pub fn map<U, F: FnOnce(V) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Lookup::Hit(value) => Lookup::Hit(f(value)),
            Lookup::Miss => Lookup::Miss,
        }
    }
}

impl<V: Clone> Lookup<&V> {
    /// Clones the borrowed hit value.
    #[inline]
    pub fn cloned(self) -> Lookup<V> {
        self.map(V::clone)
    }
}

impl<V: Copy> Lookup<&V> {
    #[inline]
    pub fn copied(self) -> Lookup<V> {
        self.map(|value| *value)
    }
}

impl<V> From<Option<V>> for Lookup<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(value) => Lookup::Hit(value),
            None => Lookup::Miss,
        }
    }
}

/// Operations every cache policy supports.
///
/// # Example
///
/// ```
/// use gencache::policy::lru::HeapLruCache;
/// use gencache::traits::{Cache, Eviction, Lookup};
///
/// fn warm<C: Cache<u64, &'static str>>(cache: &mut C, data: &[(u64, &'static str)]) {
///     for &(key, value) in data {
///         let _ = cache.insert(key, value);
///     }
/// }
///
/// let mut cache: HeapLruCache<u64, &str> = HeapLruCache::new(2);
/// warm(&mut cache, &[(1, "one"), (2, "two")]);
/// assert_eq!(cache.get(&1), Lookup::Hit(&"one"));
/// assert_eq!(cache.insert(3, "three"), Ok(Eviction::Evicted(2, "two")));
/// ```
pub trait Cache<K, V> {
    /// Error reported when a backend refuses an operation.
    type Error;

    /// Inserts or updates `key`, reporting the entry evicted to make room.
    fn insert(&mut self, key: K, value: V) -> Result<Eviction<K, V>, Self::Error>;

    /// Reads `key`. A hit counts as a use for the eviction policy.
    fn get(&mut self, key: &K) -> Lookup<&V>;

    /// Reads `key` without affecting eviction order.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Removes `key`, returning its value if it was present.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Current number of entries.
    fn len(&self) -> usize;

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the next insert of a new key would evict.
    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Removes every entry.
    fn clear(&mut self);
}

/// Recency-ordered caches: LRU and anything that tracks last use.
pub trait RecencyCache<K, V>: Cache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without removing it.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used. Returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order, `0` being most recent.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eviction_helpers() {
        let evicted: Eviction<u8, &str> = Eviction::Evicted(1, "a");
        assert!(evicted.is_evicted());
        assert_eq!(evicted.into_option(), Some((1, "a")));

        let none: Eviction<u8, &str> = Eviction::NoEviction;
        assert!(!none.is_evicted());
        assert_eq!(none.into_option(), None);
        assert_eq!(Eviction::from(Some((2u8, "b"))), Eviction::Evicted(2, "b"));
    }

    #[test]
    fn lookup_helpers() {
        let value = 7;
        let hit = Lookup::Hit(&value);
        assert!(hit.is_hit());
        assert_eq!(hit.copied(), Lookup::Hit(7));
        assert_eq!(hit.cloned().into_option(), Some(7));
        assert_eq!(hit.map(|v| v * 2), Lookup::Hit(14));

        let miss: Lookup<&i32> = Lookup::Miss;
        assert!(miss.is_miss());
        assert_eq!(miss.into_option(), None);
        assert_eq!(Lookup::from(None::<u8>), Lookup::Miss);
    }
}
