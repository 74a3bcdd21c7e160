//! Doubly linked list whose nodes live in a generational [`Arena`].
//!
//! Nodes are linked by arena [`Index`] handles instead of pointers, giving
//! stable handles and O(1) splice/move operations with stale-handle
//! detection for free.
//!
//! ## Architecture
//!
//! ```text
//!   arena (Arena<Node<T>, V>)
//!   ┌────────┬───────────────────────────────────────────────────┐
//!   │ Index  │ Node { value, link: Link { prev, next } }         │
//!   ├────────┼───────────────────────────────────────────────────┤
//!   │ 0v0    │ { value: A, prev: None,      next: Some(2v0) }    │
//!   │ 2v0    │ { value: B, prev: Some(0v0), next: Some(1v3) }    │
//!   │ 1v3    │ { value: C, prev: Some(2v0), next: None }         │
//!   └────────┴───────────────────────────────────────────────────┘
//!
//!   head ─► [0v0] ◄──► [2v0] ◄──► [1v3] ◄── tail
//! ```
//!
//! ## Operations
//! - `move_to_front(id)`: detach + attach to head, `id` unchanged
//! - `move_to_back(id)`: detach + attach to tail, `id` unchanged
//! - `remove(id)`: detach + free slot in arena
//!
//! ## Performance
//! - `push_front` / `push_back`: O(1)
//! - `pop_front` / `pop_back`: O(1)
//! - `move_to_front` / `move_to_back` / `remove`: O(1)
//! - `iter`: O(n), double-ended
//!
//! Every handle is validated by the arena before any link is touched, so a
//! stale handle fails with [`ListError::InvalidIndex`] and leaves the list
//! unchanged.

use core::fmt;
use core::iter::FusedIterator;

use crate::backend::Vector;
use crate::ds::arena::{Arena, Entry, Index};
use crate::error::{InvariantError, ListError};

/// Neighbor handles of a node; `None` means no neighbor in that direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Link {
    pub prev: Option<Index>,
    pub next: Option<Index>,
}

/// List node as stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    value: T,
    link: Link,
}

impl<T> Node<T> {
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub fn link(&self) -> Link {
        self.link
    }
}

/// Arena entry type holding list nodes of `T`.
pub type ListEntry<T> = Entry<Node<T>>;

/// Doubly linked list storing its nodes in an arena over `V`.
pub struct LinkedList<T, V> {
    arena: Arena<Node<T>, V>,
    head: Option<Index>,
    tail: Option<Index>,
    len: usize,
}

impl<T, V> LinkedList<T, V>
where
    V: Vector<ListEntry<T>>,
{
    /// Creates an empty list over `storage`.
    pub fn with_storage(storage: V) -> Self {
        Self {
            arena: Arena::with_storage(storage),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty list over default-constructed storage.
    pub fn new() -> Self
    where
        V: Default,
    {
        Self::with_storage(V::default())
    }

    /// Returns the number of nodes in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes the storage holds without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Hard upper bound on the node count, if the storage is fixed.
    #[inline]
    pub fn max_len(&self) -> Option<usize> {
        self.arena.max_len()
    }

    /// Returns `true` if `id` is currently a node in this list.
    #[inline]
    pub fn contains(&self, id: Index) -> bool {
        self.arena.contains(id)
    }

    /// Returns the value at the front of the list.
    pub fn front(&self) -> Option<&T> {
        self.head
            .and_then(|id| self.arena.get(id).ok().map(|node| &node.value))
    }

    /// Returns the handle at the front of the list.
    #[inline]
    pub fn front_index(&self) -> Option<Index> {
        self.head
    }

    /// Returns the value at the back of the list.
    pub fn back(&self) -> Option<&T> {
        self.tail
            .and_then(|id| self.arena.get(id).ok().map(|node| &node.value))
    }

    /// Returns the handle at the back of the list.
    #[inline]
    pub fn back_index(&self) -> Option<Index> {
        self.tail
    }

    /// Returns the value for a node handle.
    pub fn get(&self, id: Index) -> Result<&T, ListError> {
        Ok(&self.arena.get(id)?.value)
    }

    /// Returns a mutable reference to a node value.
    pub fn get_mut(&mut self, id: Index) -> Result<&mut T, ListError> {
        Ok(&mut self.arena.get_mut(id)?.value)
    }

    /// Makes room for `additional` more nodes.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ListError> {
        Ok(self.arena.reserve(additional)?)
    }

    /// Inserts a new node at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> Result<Index, ListError> {
        let id = self.arena.insert(Node {
            value,
            link: Link {
                prev: None,
                next: self.head,
            },
        })?;
        match self.head {
            Some(head) => self.arena.get_mut(head)?.link.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
        Ok(id)
    }

    /// Inserts a new node at the back and returns its handle.
    pub fn push_back(&mut self, value: T) -> Result<Index, ListError> {
        let id = self.arena.insert(Node {
            value,
            link: Link {
                prev: self.tail,
                next: None,
            },
        })?;
        match self.tail {
            Some(tail) => self.arena.get_mut(tail)?.link.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        Ok(id)
    }

    /// Removes and returns the front value.
    pub fn pop_front(&mut self) -> Result<T, ListError> {
        let id = self.head.ok_or(ListError::Empty)?;
        self.remove(id)
    }

    /// Removes and returns the back value.
    pub fn pop_back(&mut self) -> Result<T, ListError> {
        let id = self.tail.ok_or(ListError::Empty)?;
        self.remove(id)
    }

    /// Removes the node `id` from the list and returns its value.
    pub fn remove(&mut self, id: Index) -> Result<T, ListError> {
        self.detach(id)?;
        Ok(self.arena.remove(id)?.value)
    }

    /// Moves an existing node to the front. The handle stays valid and
    /// unchanged; only links are rewritten.
    pub fn move_to_front(&mut self, id: Index) -> Result<(), ListError> {
        self.arena.get(id)?;
        if Some(id) == self.head {
            return Ok(());
        }
        self.detach(id)?;
        self.attach_front(id)
    }

    /// Moves an existing node to the back. The handle stays valid and
    /// unchanged; only links are rewritten.
    pub fn move_to_back(&mut self, id: Index) -> Result<(), ListError> {
        self.arena.get(id)?;
        if Some(id) == self.tail {
            return Ok(());
        }
        self.detach(id)?;
        self.attach_back(id)
    }

    /// Clears the list and frees all nodes; every outstanding handle goes stale.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Returns a double-ended iterator over values from front to back.
    pub fn iter(&self) -> Iter<'_, T, V> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Returns an iterator of `(Index, &T)` from front to back.
    pub fn iter_entries(&self) -> Entries<'_, T, V> {
        Entries {
            list: self,
            current: self.head,
            remaining: self.len,
        }
    }

    #[cfg(test)]
    pub(crate) fn arena_storage_mut(&mut self) -> &mut V {
        self.arena.storage_mut()
    }

    fn detach(&mut self, id: Index) -> Result<(), ListError> {
        let Link { prev, next } = self.arena.get(id)?.link;

        match prev {
            Some(prev_id) => self.arena.get_mut(prev_id)?.link.next = next,
            None => self.head = next,
        }
        match next {
            Some(next_id) => self.arena.get_mut(next_id)?.link.prev = prev,
            None => self.tail = prev,
        }

        self.arena.get_mut(id)?.link = Link::default();
        self.len -= 1;
        Ok(())
    }

    fn attach_front(&mut self, id: Index) -> Result<(), ListError> {
        let old_head = self.head;
        self.arena.get_mut(id)?.link = Link {
            prev: None,
            next: old_head,
        };
        match old_head {
            Some(head) => self.arena.get_mut(head)?.link.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
        Ok(())
    }

    fn attach_back(&mut self, id: Index) -> Result<(), ListError> {
        let old_tail = self.tail;
        self.arena.get_mut(id)?.link = Link {
            prev: old_tail,
            next: None,
        };
        match old_tail {
            Some(tail) => self.arena.get_mut(tail)?.link.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        Ok(())
    }

    /// Checks that the forward chain from `head` visits exactly `len` nodes,
    /// ends at `tail`, and that every `prev` link mirrors a `next` link.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() != self.tail.is_none() {
            return Err(InvariantError::new("list head and tail disagree on emptiness"));
        }
        if self.head.is_none() != (self.len == 0) {
            return Err(InvariantError::new("list len disagrees with head"));
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;
        while let Some(id) = current {
            let node = self
                .arena
                .get(id)
                .map_err(|_| InvariantError::new("list link points at a stale node"))?;
            if node.link.prev != prev {
                return Err(InvariantError::new("list prev link does not mirror next link"));
            }
            count += 1;
            if count > self.len {
                return Err(InvariantError::new("list forward chain is longer than len"));
            }
            prev = Some(id);
            current = node.link.next;
        }

        if count != self.len {
            return Err(InvariantError::new("list forward chain is shorter than len"));
        }
        if prev != self.tail {
            return Err(InvariantError::new("list forward chain does not end at tail"));
        }
        if self.arena.len() != self.len {
            return Err(InvariantError::new("list arena holds unlinked nodes"));
        }
        self.arena.check_invariants()
    }
}

impl<T, V> Default for LinkedList<T, V>
where
    V: Vector<ListEntry<T>> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> fmt::Debug for LinkedList<T, V>
where
    T: fmt::Debug,
    V: Vector<ListEntry<T>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over values, front to back (or back to front via `rev`).
pub struct Iter<'a, T, V> {
    list: &'a LinkedList<T, V>,
    front: Option<Index>,
    back: Option<Index>,
    remaining: usize,
}

impl<'a, T, V> Iterator for Iter<'a, T, V>
where
    V: Vector<ListEntry<T>>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.arena.get(self.front?).ok()?;
        self.front = node.link.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, V> DoubleEndedIterator for Iter<'_, T, V>
where
    V: Vector<ListEntry<T>>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.arena.get(self.back?).ok()?;
        self.back = node.link.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T, V> ExactSizeIterator for Iter<'_, T, V> where V: Vector<ListEntry<T>> {}

impl<T, V> FusedIterator for Iter<'_, T, V> where V: Vector<ListEntry<T>> {}

/// Iterator over `(Index, &T)` pairs from front to back.
pub struct Entries<'a, T, V> {
    list: &'a LinkedList<T, V>,
    current: Option<Index>,
    remaining: usize,
}

impl<'a, T, V> Iterator for Entries<'a, T, V>
where
    V: Vector<ListEntry<T>>,
{
    type Item = (Index, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.current?;
        let node = self.list.arena.get(id).ok()?;
        self.current = node.link.next;
        self.remaining -= 1;
        Some((id, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, V> IntoIterator for &'a LinkedList<T, V>
where
    V: Vector<ListEntry<T>>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::backend::AllocVec;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        PushFront(u16),
        PushBack(u16),
        PopFront,
        PopBack,
        Remove(usize),
        MoveToFront(usize),
        MoveToBack(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u16>().prop_map(Op::PushFront),
            any::<u16>().prop_map(Op::PushBack),
            Just(Op::PopFront),
            Just(Op::PopBack),
            any::<usize>().prop_map(Op::Remove),
            any::<usize>().prop_map(Op::MoveToFront),
            any::<usize>().prop_map(Op::MoveToBack),
        ]
    }

    proptest! {
        /// Property: the list always mirrors a VecDeque model, forward and
        /// backward walks agree, and moves never change a node's handle.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_deque_model(ops in prop::collection::vec(op(), 0..150)) {
            use std::collections::VecDeque;

            let mut list: LinkedList<u16, AllocVec<ListEntry<u16>>> = LinkedList::new();
            let mut model: VecDeque<(Index, u16)> = VecDeque::new();

            for op in ops {
                match op {
                    Op::PushFront(v) => model.push_front((list.push_front(v).unwrap(), v)),
                    Op::PushBack(v) => model.push_back((list.push_back(v).unwrap(), v)),
                    Op::PopFront => {
                        let expected = model.pop_front().map(|(_, v)| v).ok_or(ListError::Empty);
                        prop_assert_eq!(list.pop_front(), expected);
                    },
                    Op::PopBack => {
                        let expected = model.pop_back().map(|(_, v)| v).ok_or(ListError::Empty);
                        prop_assert_eq!(list.pop_back(), expected);
                    },
                    Op::Remove(i) if !model.is_empty() => {
                        let (id, v) = model.remove(i % model.len()).unwrap();
                        prop_assert_eq!(list.remove(id), Ok(v));
                    },
                    Op::MoveToFront(i) if !model.is_empty() => {
                        let entry = model.remove(i % model.len()).unwrap();
                        list.move_to_front(entry.0).unwrap();
                        model.push_front(entry);
                    },
                    Op::MoveToBack(i) if !model.is_empty() => {
                        let entry = model.remove(i % model.len()).unwrap();
                        list.move_to_back(entry.0).unwrap();
                        model.push_back(entry);
                    },
                    _ => {},
                }

                prop_assert_eq!(list.len(), model.len());
                let forward: Vec<_> = list.iter_entries().map(|(id, v)| (id, *v)).collect();
                let expected: Vec<_> = model.iter().copied().collect();
                prop_assert_eq!(&forward, &expected);

                let mut backward: Vec<_> = list.iter().rev().copied().collect();
                backward.reverse();
                let forward_values: Vec<_> = forward.iter().map(|(_, v)| *v).collect();
                prop_assert_eq!(backward, forward_values);
                prop_assert!(list.check_invariants().is_ok());
            }
        }
    }
}
