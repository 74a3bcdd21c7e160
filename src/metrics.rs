//! Operation counters for [`LruCache`](crate::policy::lru::LruCache).
//!
//! Recording is split from reading: the cache owns an [`LruMetrics`] and
//! bumps counters as it works, callers read a copy through
//! [`MetricsSnapshotProvider`].
//!
//! ```text
//!   LruCache ──record_*──► LruMetrics ──snapshot()──► LruMetricsSnapshot
//!                          (u64 + MetricsCell)        (plain u64 / usize)
//! ```
//!
//! Read-only cache methods (`peek`, `peek_lru`, `recency_rank`) take `&self`,
//! so their counters are [`MetricsCell`]s.

use core::cell::Cell;

/// Counter that can be bumped through a shared reference.
///
/// Not `Sync`; a cache shared across threads goes through a lock that hands
/// out exclusive access.
#[repr(transparent)]
#[derive(Debug, Default, Clone)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get().saturating_add(1));
    }
}

/// Live counters kept by an LRU cache.
#[derive(Debug, Default, Clone)]
pub struct LruMetrics {
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub evicted_entries: u64,
    pub removals: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub clears: u64,
    pub peek_calls: MetricsCell,
    pub peek_hits: MetricsCell,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_scan_steps: MetricsCell,
}

impl LruMetrics {
    #[inline]
    pub fn record_get_hit(&mut self) {
        self.get_hits += 1;
    }

    #[inline]
    pub fn record_get_miss(&mut self) {
        self.get_misses += 1;
    }

    #[inline]
    pub fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    #[inline]
    pub fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    #[inline]
    pub fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    #[inline]
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    #[inline]
    pub fn record_pop_lru(&mut self, found: bool) {
        self.pop_lru_calls += 1;
        if found {
            self.pop_lru_found += 1;
        }
    }

    #[inline]
    pub fn record_touch(&mut self, found: bool) {
        self.touch_calls += 1;
        if found {
            self.touch_found += 1;
        }
    }

    #[inline]
    pub fn record_clear(&mut self) {
        self.clears += 1;
    }

    #[inline]
    pub fn record_peek(&self, hit: bool) {
        self.peek_calls.incr();
        if hit {
            self.peek_hits.incr();
        }
    }

    #[inline]
    pub fn record_recency_rank_call(&self) {
        self.recency_rank_calls.incr();
    }

    #[inline]
    pub fn record_recency_rank_scan_step(&self) {
        self.recency_rank_scan_steps.incr();
    }

    /// Copies the counters out, adding the size gauges.
    pub fn snapshot(&self, len: usize, capacity: usize) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.get_hits + self.get_misses,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_new + self.insert_updates,
            insert_new: self.insert_new,
            insert_updates: self.insert_updates,
            evicted_entries: self.evicted_entries,
            removals: self.removals,
            pop_lru_calls: self.pop_lru_calls,
            pop_lru_found: self.pop_lru_found,
            touch_calls: self.touch_calls,
            touch_found: self.touch_found,
            clears: self.clears,
            peek_calls: self.peek_calls.get(),
            peek_hits: self.peek_hits.get(),
            recency_rank_calls: self.recency_rank_calls.get(),
            recency_rank_scan_steps: self.recency_rank_scan_steps.get(),
            cache_len: len,
            capacity,
        }
    }
}

/// Point-in-time copy of [`LruMetrics`] plus size gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,

    pub evicted_entries: u64,
    pub removals: u64,

    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub clears: u64,
    pub peek_calls: u64,
    pub peek_hits: u64,
    pub recency_rank_calls: u64,
    pub recency_rank_scan_steps: u64,

    pub cache_len: usize,
    pub capacity: usize,
}

impl LruMetricsSnapshot {
    /// Fraction of `get` calls that hit, or `0.0` before the first call.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

/// Types that can hand out a metrics snapshot.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
