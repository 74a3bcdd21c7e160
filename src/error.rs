//! Error types for the gencache library.
//!
//! ## Key Components
//!
//! - [`BackendError`]: Returned by storage backends ([`Vector`](crate::backend::Vector),
//!   [`Map`](crate::backend::Map)) on overflow or out-of-range access.
//! - [`ArenaError`]: Returned by [`Arena`](crate::ds::Arena) when a handle is
//!   stale, foreign or out of range, or when storage is exhausted.
//! - [`ListError`]: Returned by [`LinkedList`](crate::ds::LinkedList); wraps
//!   arena failures and reports operations on an empty list.
//! - [`CacheError`]: Returned by cache inserts when a backend misbehaves.
//!   Hits, misses and evictions are never errors.
//! - [`ConfigError`]: Returned when cache construction parameters are invalid
//!   (e.g. a fixed backend smaller than the requested capacity).
//! - [`InvariantError`]: Returned by `check_invariants` methods.
//!
//! Errors convert upward through the layers:
//!
//! ```text
//!   BackendError ──► ArenaError ──► ListError ──► CacheError
//!                                                    ▲
//!   BackendError (map) ──────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use gencache::backend::{AllocBTreeMap, Array};
//! use gencache::error::ConfigError;
//! use gencache::policy::lru::LruCache;
//!
//! // A fixed backend with 4 slots cannot hold a cache of capacity 8.
//! let err = LruCache::<u32, u32, Array<_, 4>, AllocBTreeMap<_, _>>::try_new(8).unwrap_err();
//! assert!(matches!(err, ConfigError::StorageTooSmall { capacity: 8, limit: 4 }));
//! ```

use core::fmt;

use crate::ds::arena::Index;

// ---------------------------------------------------------------------------
// BackendError
// ---------------------------------------------------------------------------

/// Failure reported by a storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendError {
    /// A fixed-capacity backend cannot take another element.
    Full { capacity: usize },
    /// Positional access beyond the current length.
    OutOfBounds { index: usize, len: usize },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full { capacity } => write!(f, "backend full (capacity {capacity})"),
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds (len {len})")
            },
        }
    }
}

impl core::error::Error for BackendError {}

// ---------------------------------------------------------------------------
// ArenaError
// ---------------------------------------------------------------------------

/// Failure reported by [`Arena`](crate::ds::Arena) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    /// The slot exists but is free or holds a later generation.
    StaleIndex(Index),
    /// The slot lies beyond the arena's storage.
    OutOfBounds { slot: usize, len: usize },
    /// No free slot and the backing storage cannot grow.
    StorageExhausted(BackendError),
}

impl ArenaError {
    /// Returns `true` for handle validation failures (stale or out of range).
    #[inline]
    pub fn is_invalid_index(&self) -> bool {
        matches!(self, Self::StaleIndex(_) | Self::OutOfBounds { .. })
    }
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleIndex(index) => write!(
                f,
                "stale index (slot {}, generation {})",
                index.slot(),
                index.generation()
            ),
            Self::OutOfBounds { slot, len } => {
                write!(f, "slot {slot} out of bounds (arena has {len} slots)")
            },
            Self::StorageExhausted(err) => write!(f, "arena storage exhausted: {err}"),
        }
    }
}

impl core::error::Error for ArenaError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::StorageExhausted(err) => Some(err),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ListError
// ---------------------------------------------------------------------------

/// Failure reported by [`LinkedList`](crate::ds::LinkedList) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// The arena rejected a node handle.
    InvalidIndex(ArenaError),
    /// The arena could not allocate a node.
    Exhausted(ArenaError),
    /// The operation requires a non-empty list.
    Empty,
}

impl From<ArenaError> for ListError {
    fn from(err: ArenaError) -> Self {
        match err {
            ArenaError::StorageExhausted(_) => Self::Exhausted(err),
            _ => Self::InvalidIndex(err),
        }
    }
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex(err) => write!(f, "invalid list node: {err}"),
            Self::Exhausted(err) => write!(f, "cannot allocate list node: {err}"),
            Self::Empty => f.write_str("list is empty"),
        }
    }
}

impl core::error::Error for ListError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidIndex(err) | Self::Exhausted(err) => Some(err),
            Self::Empty => None,
        }
    }
}

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Failure reported by cache operations.
///
/// Only backend misconfiguration surfaces here; a cache whose backends passed
/// construction-time validation never returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// The recency list failed (usually node storage exhaustion).
    List(ListError),
    /// The key map rejected an insert.
    Map(BackendError),
}

impl From<ListError> for CacheError {
    fn from(err: ListError) -> Self {
        Self::List(err)
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(err) => write!(f, "recency list error: {err}"),
            Self::Map(err) => write!(f, "key map error: {err}"),
        }
    }
}

impl core::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::List(err) => Some(err),
            Self::Map(err) => Some(err),
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LruCache::with_backends`](crate::policy::lru::LruCache::with_backends)
/// and [`LruCacheBuilder::try_build_with`](crate::builder::LruCacheBuilder::try_build_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The node storage holds fewer slots than the requested capacity.
    StorageTooSmall { capacity: usize, limit: usize },
    /// The key map holds fewer entries than the requested capacity.
    MapTooSmall { capacity: usize, limit: usize },
    /// The node storage already contains elements.
    StorageNotEmpty { len: usize },
    /// The key map already contains entries.
    MapNotEmpty { len: usize },
    /// Node storage could not be preallocated for the requested capacity.
    Preallocation(ListError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageTooSmall { capacity, limit } => write!(
                f,
                "node storage limited to {limit} slots, capacity {capacity} requested"
            ),
            Self::MapTooSmall { capacity, limit } => write!(
                f,
                "key map limited to {limit} entries, capacity {capacity} requested"
            ),
            Self::StorageNotEmpty { len } => {
                write!(f, "node storage must start empty (has {len} elements)")
            },
            Self::MapNotEmpty { len } => {
                write!(f, "key map must start empty (has {len} entries)")
            },
            Self::Preallocation(err) => write!(f, "node storage preallocation failed: {err}"),
        }
    }
}

impl core::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Preallocation(err) => Some(err),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal data-structure invariants are violated.
///
/// Produced by `check_invariants` methods on [`Arena`](crate::ds::Arena),
/// [`LinkedList`](crate::ds::LinkedList) and
/// [`LruCache`](crate::policy::lru::LruCache).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvariantError(&'static str);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: &'static str) -> Self {
        Self(msg)
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl core::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
