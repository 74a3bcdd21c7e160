#![no_main]

use std::collections::VecDeque;

use gencache::backend::AllocVec;
use gencache::ds::Index;
use gencache::ds::linked_list::{LinkedList, ListEntry};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on LinkedList against a VecDeque model.
//
// Covers push_front, push_back, pop_front, pop_back, move_to_front,
// move_to_back, remove, stale-handle use and clear.
fuzz_target!(|data: &[u8]| {
    let mut list: LinkedList<u8, AllocVec<ListEntry<u8>>> = LinkedList::new();
    let mut model: VecDeque<(Index, u8)> = VecDeque::new();
    let mut stale: Vec<Index> = Vec::new();

    for chunk in data.chunks_exact(2) {
        let (op, arg) = (chunk[0] % 9, chunk[1]);
        let pick = |len: usize| arg as usize % len;

        match op {
            0 => model.push_front((list.push_front(arg).unwrap(), arg)),
            1 => model.push_back((list.push_back(arg).unwrap(), arg)),
            2 => {
                if let Some((id, v)) = model.pop_front() {
                    assert_eq!(list.pop_front(), Ok(v));
                    stale.push(id);
                } else {
                    assert!(list.pop_front().is_err());
                }
            },
            3 => {
                if let Some((id, v)) = model.pop_back() {
                    assert_eq!(list.pop_back(), Ok(v));
                    stale.push(id);
                } else {
                    assert!(list.pop_back().is_err());
                }
            },
            4 if !model.is_empty() => {
                let entry = model.remove(pick(model.len())).unwrap();
                list.move_to_front(entry.0).unwrap();
                model.push_front(entry);
            },
            5 if !model.is_empty() => {
                let entry = model.remove(pick(model.len())).unwrap();
                list.move_to_back(entry.0).unwrap();
                model.push_back(entry);
            },
            6 if !model.is_empty() => {
                let (id, v) = model.remove(pick(model.len())).unwrap();
                assert_eq!(list.remove(id), Ok(v));
                stale.push(id);
            },
            7 if !stale.is_empty() => {
                let id = stale[pick(stale.len())];
                assert!(list.remove(id).is_err());
                assert!(list.move_to_front(id).is_err());
            },
            8 => {
                list.clear();
                stale.extend(model.drain(..).map(|(id, _)| id));
            },
            _ => {},
        }

        assert_eq!(list.len(), model.len());
        assert_eq!(list.front_index(), model.front().map(|(id, _)| *id));
        assert_eq!(list.back_index(), model.back().map(|(id, _)| *id));
    }

    let forward: Vec<u8> = list.iter().copied().collect();
    let expected: Vec<u8> = model.iter().map(|(_, v)| *v).collect();
    assert_eq!(forward, expected);
    assert!(list.iter().rev().copied().eq(expected.into_iter().rev()));
    assert!(list.check_invariants().is_ok());
});
