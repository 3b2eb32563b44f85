//! Property tests: the ring behaves like a bounded FIFO queue.

use std::collections::VecDeque;

use proptest::prelude::*;
use rtmix_ring::RingBuffer;

#[derive(Clone, Debug)]
enum Op {
    Push(u16),
    Pop,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![any::<u16>().prop_map(Op::Push), Just(Op::Pop)],
        0..512,
    )
}

proptest! {
    #[test]
    fn matches_bounded_vecdeque(ops in arb_ops()) {
        let mut ring = RingBuffer::<u16, 8>::new();
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    let accepted = ring.push(v).is_ok();
                    prop_assert_eq!(accepted, model.len() < 7);
                    if accepted {
                        model.push_back(v);
                    }
                }
                Op::Pop => prop_assert_eq!(ring.pop(), model.pop_front()),
            }
            prop_assert_eq!(ring.len(), model.len());
            prop_assert_eq!(ring.is_empty(), model.is_empty());
            prop_assert_eq!(ring.is_full(), model.len() == 7);
        }
    }

    #[test]
    fn holds_exactly_n_minus_one(fill in 0usize..64) {
        let mut ring = RingBuffer::<usize, 16>::new();
        let accepted = (0..fill).filter(|&i| ring.push(i).is_ok()).count();
        prop_assert_eq!(accepted, fill.min(15));
        for i in 0..accepted {
            prop_assert_eq!(ring.pop(), Some(i));
        }
        prop_assert!(ring.pop().is_none());
    }
}
