//! Index-linked data structures the cache is built from.

pub mod arena;
pub mod linked_list;

pub use arena::{Arena, Entry, Index};
pub use linked_list::{Link, LinkedList, ListEntry, Node};
