//! Cache eviction policies.
//!
//! Each policy composes the structures in [`crate::ds`] with a key map and
//! implements [`Cache`](crate::traits::Cache).

pub mod lru;
