#![no_main]

use gencache::backend::Array;
use gencache::ds::arena::{Arena, Entry, Index};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary insert/remove/get/clear sequences on a fixed-size Arena,
// including forged handles built from raw input bytes.
fuzz_target!(|data: &[u8]| {
    let mut arena: Arena<u8, Array<Entry<u8>, 32>> = Arena::new();
    let mut live: Vec<(Index, u8)> = Vec::new();
    let mut dead: Vec<Index> = Vec::new();

    for chunk in data.chunks_exact(2) {
        let (op, arg) = (chunk[0] % 5, chunk[1]);
        match op {
            0 => match arena.insert(arg) {
                Ok(id) => {
                    assert!(!dead.contains(&id));
                    live.push((id, arg));
                },
                Err(_) => assert_eq!(arena.len(), 32),
            },
            1 => {
                if !live.is_empty() {
                    let (id, value) = live.swap_remove(arg as usize % live.len());
                    assert_eq!(arena.remove(id), Ok(value));
                    dead.push(id);
                }
            },
            2 => {
                if !dead.is_empty() {
                    let id = dead[arg as usize % dead.len()];
                    assert!(arena.get(id).is_err());
                    assert!(arena.remove(id).is_err());
                }
            },
            3 => {
                let forged = Index::from_raw_parts(usize::from(arg % 40), u64::from(arg / 40));
                let expected = live.iter().find(|(id, _)| *id == forged).map(|(_, v)| v);
                assert_eq!(arena.get(forged).ok(), expected);
            },
            _ => {
                arena.clear();
                dead.extend(live.drain(..).map(|(id, _)| id));
            },
        }

        assert_eq!(arena.len(), live.len());
    }

    for (id, value) in &live {
        assert_eq!(arena.get(*id), Ok(value));
    }
    assert!(arena.check_invariants().is_ok());
});
