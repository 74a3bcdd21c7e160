pub use crate::backend::{Array, ArrayMap, Map, Vector};
#[cfg(feature = "alloc")]
pub use crate::backend::{AllocBTreeMap, AllocVec};
#[cfg(feature = "std")]
pub use crate::backend::FxMap;
pub use crate::builder::LruCacheBuilder;
pub use crate::error::{CacheError, ConfigError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{LruMetricsSnapshot, MetricsSnapshotProvider};
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentLruCache;
#[cfg(feature = "std")]
pub use crate::policy::lru::FxLruCache;
#[cfg(feature = "alloc")]
pub use crate::policy::lru::HeapLruCache;
pub use crate::policy::lru::{LruCache, StackLruCache};
pub use crate::traits::{Cache, Eviction, Lookup, RecencyCache};
