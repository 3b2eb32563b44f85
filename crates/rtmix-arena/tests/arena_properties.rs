//! Property tests for arena placement, alignment and exhaustion.

use proptest::prelude::*;
use rtmix_arena::{Arena, ArenaError};

const CAPACITY: usize = 4096;

/// (size, alignment) pairs with power-of-two alignments from 1 to 128.
fn arb_requests() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..256, 0u32..8).prop_map(|(s, p)| (s, 1usize << p)), 1..64)
}

proptest! {
    #[test]
    fn regions_are_aligned_disjoint_and_contained(requests in arb_requests()) {
        let arena = Arena::new(CAPACITY);
        let base = arena.allocate(0, 1).unwrap().as_ptr() as usize;

        let mut regions = Vec::new();
        for (size, align) in requests {
            let Ok(bytes) = arena.allocate(size, align) else {
                continue;
            };
            let start = bytes.as_ptr() as usize;
            prop_assert_eq!(start % align, 0, "misaligned for {}", align);
            prop_assert_eq!(bytes.len(), size);
            regions.push((start, start + size));
        }

        for &(start, end) in &regions {
            prop_assert!(start >= base && end <= base + CAPACITY);
        }
        regions.sort_unstable();
        for pair in regions.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].0, "overlap: {:?} and {:?}", pair[0], pair[1]);
        }
        prop_assert!(arena.used() <= arena.capacity());
    }

    #[test]
    fn first_allocation_after_reset_reuses_first_address(requests in arb_requests()) {
        let mut arena = Arena::new(CAPACITY);
        let (size, align) = requests[0];
        let first = arena.allocate(size, align).unwrap().as_ptr() as usize;
        for &(size, align) in &requests[1..] {
            let _ = arena.allocate(size, align);
        }

        arena.reset();
        let again = arena.allocate(size, align).unwrap().as_ptr() as usize;
        prop_assert_eq!(first, again);
    }

    #[test]
    fn failed_allocation_leaves_usage_untouched(requests in arb_requests()) {
        let arena = Arena::new(512);
        for (size, align) in requests {
            let before = arena.used();
            match arena.allocate(size, align) {
                Ok(_) => prop_assert!(arena.used() >= before + size),
                Err(ArenaError::CapacityExceeded { requested, used, capacity, .. }) => {
                    prop_assert_eq!(requested, size);
                    prop_assert_eq!(used, before);
                    prop_assert_eq!(capacity, 512);
                    prop_assert_eq!(arena.used(), before);
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }
    }
}
