// ==============================================
// ARENA + LIST PROPERTY TESTS (integration)
// ==============================================
//
// Generation tagging and list link consistency, checked on both the heap
// and the fixed backend.

use gencache::backend::{AllocVec, Array};
use gencache::ds::arena::{Arena, Entry, Index};
use gencache::ds::linked_list::{LinkedList, ListEntry};
use gencache::error::{ArenaError, ListError};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum ArenaOp {
    Insert(u32),
    Remove(usize),
    Clear,
}

fn arena_op() -> impl Strategy<Value = ArenaOp> {
    prop_oneof![
        6 => any::<u32>().prop_map(ArenaOp::Insert),
        4 => any::<usize>().prop_map(ArenaOp::Remove),
        1 => Just(ArenaOp::Clear),
    ]
}

proptest! {
    /// Property: live handles always resolve, dead handles never do, even
    /// after their slot is reused.
    #[test]
    fn arena_handles_never_resurrect(ops in prop::collection::vec(arena_op(), 0..300)) {
        let mut arena: Arena<u32, AllocVec<Entry<u32>>> = Arena::new();
        let mut live: Vec<(Index, u32)> = Vec::new();
        let mut dead: Vec<Index> = Vec::new();

        for op in ops {
            match op {
                ArenaOp::Insert(v) => {
                    let id = arena.insert(v).unwrap();
                    prop_assert!(!dead.contains(&id));
                    live.push((id, v));
                },
                ArenaOp::Remove(i) if !live.is_empty() => {
                    let (id, v) = live.swap_remove(i % live.len());
                    prop_assert_eq!(arena.remove(id), Ok(v));
                    dead.push(id);
                },
                ArenaOp::Clear => {
                    arena.clear();
                    dead.extend(live.drain(..).map(|(id, _)| id));
                },
                _ => {},
            }

            for &(id, v) in &live {
                prop_assert_eq!(arena.get(id), Ok(&v));
            }
            for &id in &dead {
                prop_assert!(!arena.contains(id));
                prop_assert!(arena.get(id).is_err());
            }
            prop_assert_eq!(arena.len(), live.len());
            prop_assert!(arena.check_invariants().is_ok());
        }
    }

    /// Property: the forward walk has `len` entries and equals the reversed
    /// backward walk; moving a node keeps its handle.
    #[test]
    fn list_walks_agree(
        values in prop::collection::vec(any::<u16>(), 1..64),
        moves in prop::collection::vec(any::<usize>(), 0..64)
    ) {
        let mut list: LinkedList<u16, AllocVec<ListEntry<u16>>> = LinkedList::new();
        let ids: Vec<Index> = values.iter().map(|&v| list.push_back(v).unwrap()).collect();

        for m in moves {
            let id = ids[m % ids.len()];
            let value = *list.get(id).unwrap();
            if m % 2 == 0 {
                list.move_to_front(id).unwrap();
                prop_assert_eq!(list.front_index(), Some(id));
            } else {
                list.move_to_back(id).unwrap();
                prop_assert_eq!(list.back_index(), Some(id));
            }
            prop_assert_eq!(list.get(id), Ok(&value));
        }

        let forward: Vec<u16> = list.iter().copied().collect();
        let mut backward: Vec<u16> = list.iter().rev().copied().collect();
        backward.reverse();
        prop_assert_eq!(forward.len(), list.len());
        prop_assert_eq!(forward, backward);
        prop_assert!(list.check_invariants().is_ok());
    }
}

#[test]
fn forged_and_out_of_range_handles_are_rejected() {
    let mut arena: Arena<&str, Array<Entry<&str>, 4>> = Arena::new();
    let id = arena.insert("a").unwrap();

    let future = Index::from_raw_parts(id.slot(), id.generation() + 1);
    assert_eq!(arena.get(future), Err(ArenaError::StaleIndex(future)));

    let far = Index::from_raw_parts(10, 0);
    assert_eq!(
        arena.remove(far),
        Err(ArenaError::OutOfBounds { slot: 10, len: 1 })
    );
    assert_eq!(arena.get(id), Ok(&"a"));
}

#[test]
fn fixed_list_reuses_slots_after_pop() {
    let mut list: LinkedList<u8, Array<ListEntry<u8>, 2>> = LinkedList::new();
    let a = list.push_back(1).unwrap();
    list.push_back(2).unwrap();
    assert!(matches!(list.push_back(3), Err(ListError::Exhausted(_))));

    assert_eq!(list.pop_front(), Ok(1));
    let c = list.push_front(3).unwrap();
    assert_eq!(c.slot(), a.slot());
    assert_ne!(c, a);
    assert!(matches!(list.remove(a), Err(ListError::InvalidIndex(_))));
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![3, 2]);
}
