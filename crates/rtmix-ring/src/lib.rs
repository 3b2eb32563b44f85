//! Fixed-capacity lock-free ring buffer for one producer and one consumer.
//!
//! [`RingBuffer<T, N>`] stores up to `N - 1` values in an inline slot
//! array. One slot is always left empty so that "full" (`write + 1 ==
//! read`) and "empty" (`write == read`) are distinguishable without a
//! shared counter. `push` and `pop` never block, spin, allocate or panic:
//! a full or empty buffer is reported immediately and the caller chooses
//! whether to retry, yield, or drop data.
//!
//! # Sharing between threads
//!
//! ```text
//! RingBuffer<T, N> ──split()──► Arc<RingBuffer<T, N>>
//!                                 ├── Producer<T, N>  (push, &mut self, !Clone)
//!                                 └── Consumer<T, N>  (pop,  &mut self, !Clone)
//! ```
//!
//! Exactly one [`Producer`] and one [`Consumer`] exist per buffer, and
//! both take `&mut self`, so the single-writer/single-reader contract is
//! enforced by the type system. The `Arc` is allocated once by
//! [`RingBuffer::split`], before any real-time work starts.
//!
//! # Memory ordering
//!
//! Each side loads its own index with `Relaxed` and the other side's
//! index with `Acquire`, then publishes its own index with `Release`.
//! A consumer that observes a new write index therefore also observes
//! the value stored in that slot, and a producer that observes a new
//! read index knows the slot's previous value has been moved out.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod ring;

pub use ring::{Consumer, Producer, RingBuffer};
