#![no_main]

use gencache::policy::lru::{HeapLruCache, StackLruCache};
use gencache::traits::Lookup;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on the heap and the fixed LRU cache in
// lockstep; both must report identical outcomes and keep their invariants.
fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(first % 9);

    let mut heap: HeapLruCache<u8, u8> = HeapLruCache::new(capacity);
    let Ok(mut stack) = StackLruCache::<u8, u8, 8>::try_new(capacity) else {
        return;
    };

    for chunk in rest.chunks_exact(2) {
        let (op, key) = (chunk[0] % 7, chunk[1] % 32);
        match op {
            0 | 1 => assert_eq!(heap.insert(key, chunk[0]), stack.insert(key, chunk[0])),
            2 => {
                let hit = heap.get(&key).copied();
                assert_eq!(hit, stack.get(&key).copied());
                if let Lookup::Hit(_) = hit {
                    assert_eq!(heap.recency_rank(&key), Some(0));
                }
            },
            3 => assert_eq!(heap.remove(&key), stack.remove(&key)),
            4 => assert_eq!(heap.touch(&key), stack.touch(&key)),
            5 => assert_eq!(heap.pop_lru(), stack.pop_lru()),
            _ => assert_eq!(heap.peek(&key), stack.peek(&key)),
        }

        assert!(heap.len() <= capacity);
        assert_eq!(heap.len(), stack.len());
        assert!(heap.iter().eq(stack.iter()));
    }

    assert!(heap.check_invariants().is_ok());
    assert!(stack.check_invariants().is_ok());
});
