//! gencache: a generational arena, an arena-backed doubly linked list, and an
//! LRU cache built on both.
//!
//! Every layer is generic over its storage, so the same code runs with heap
//! backends or in a fixed, allocation-free footprint.
//!
//! ```text
//!   LruCache ──► LinkedList ──► Arena ──► Vector backend
//!       └──────────────────────────────► Map backend
//! ```
//!
//! Without the `alloc` feature the crate is `no_std` and only the fixed
//! backends ([`backend::Array`], [`backend::ArrayMap`]) are available.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod backend;
pub mod builder;
pub mod ds;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod traits;

pub use crate::ds::{Arena, Entry, Index, Link, LinkedList, Node};
pub use crate::error::{ArenaError, BackendError, CacheError, ConfigError, InvariantError, ListError};
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentLruCache;
#[cfg(feature = "std")]
pub use crate::policy::lru::FxLruCache;
#[cfg(feature = "alloc")]
pub use crate::policy::lru::HeapLruCache;
pub use crate::policy::lru::{Block, LruCache, StackLruCache};
pub use crate::traits::{Cache, Eviction, Lookup, RecencyCache};
