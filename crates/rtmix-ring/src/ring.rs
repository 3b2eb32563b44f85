//! Slot storage, index protocol and the split endpoints.
//!
//! Slots are `UnsafeCell<MaybeUninit<T>>`: a slot is initialised exactly
//! when its index lies in `[read, write)` (mod `N`). The producer only
//! writes the slot at `write`, the consumer only reads the slot at `read`,
//! and each publishes with a `Release` store after touching the slot.

#![allow(unsafe_code)]

use std::cell::UnsafeCell;
use std::fmt;
use std::mem::MaybeUninit;
use std::sync::atomic::{fence, AtomicUsize, Ordering};
use std::sync::Arc;

/// An index on its own cache line.
///
/// 128-byte alignment covers both 64-byte (x86) and 128-byte (Apple
/// M-series) cache line sizes, so the producer's and consumer's stores
/// never invalidate each other's line.
#[repr(align(128))]
struct PaddedIndex(AtomicUsize);

impl PaddedIndex {
    const fn new() -> Self {
        Self(AtomicUsize::new(0))
    }
}

/// A fixed-capacity single-producer/single-consumer ring buffer.
///
/// `N` is the number of slots; at most `N - 1` values are stored at once.
/// `N < 2` is rejected at compile time.
///
/// An unsplit buffer can be used from a single owner through
/// [`push`](RingBuffer::push) and [`pop`](RingBuffer::pop). To hand values
/// between two threads, [`split`](RingBuffer::split) it.
///
/// ```
/// use rtmix_ring::RingBuffer;
///
/// let mut ring = RingBuffer::<i32, 4>::new();
/// assert!(ring.push(1).is_ok());
/// assert!(ring.push(2).is_ok());
/// assert!(ring.push(3).is_ok());
/// assert_eq!(ring.push(4), Err(4)); // one slot is always kept free
/// assert_eq!(ring.pop(), Some(1));
/// assert_eq!(ring.pop(), Some(2));
/// ```
pub struct RingBuffer<T, const N: usize> {
    slots: [UnsafeCell<MaybeUninit<T>>; N],
    /// Next slot the producer will fill. Written only by the producer.
    write: PaddedIndex,
    /// Next slot the consumer will drain. Written only by the consumer.
    read: PaddedIndex,
}

// SAFETY: values of `T` move between threads through the slots, hence
// `T: Send`. Shared access is sound because slot contents are only touched
// by `push_shared`/`pop_shared`, whose callers guarantee a single producer
// and a single consumer; every other `&self` method reads atomics only.
unsafe impl<T: Send, const N: usize> Send for RingBuffer<T, N> {}
// SAFETY: see above.
unsafe impl<T: Send, const N: usize> Sync for RingBuffer<T, N> {}

impl<T, const N: usize> RingBuffer<T, N> {
    /// Create an empty buffer with `N` slots (`N - 1` usable).
    ///
    /// Fewer than two slots is rejected when the type is instantiated:
    ///
    /// ```compile_fail
    /// let ring = rtmix_ring::RingBuffer::<u8, 1>::new();
    /// ```
    pub fn new() -> Self {
        const { assert!(N >= 2, "RingBuffer needs at least 2 slots") };
        Self {
            slots: std::array::from_fn(|_| UnsafeCell::new(MaybeUninit::uninit())),
            write: PaddedIndex::new(),
            read: PaddedIndex::new(),
        }
    }

    /// Append a value. Returns it back in `Err` if the buffer is full.
    pub fn push(&mut self, value: T) -> Result<(), T> {
        // SAFETY: `&mut self` makes this the only producer and consumer.
        unsafe { self.push_shared(value) }
    }

    /// Remove the oldest value, or `None` if the buffer is empty.
    pub fn pop(&mut self) -> Option<T> {
        // SAFETY: `&mut self` makes this the only producer and consumer.
        unsafe { self.pop_shared() }
    }

    /// Whether the buffer looked empty at the instant of the call.
    ///
    /// Both indices are loaded with `Relaxed`, so under concurrent use the
    /// answer is a hint and may already be stale when it returns.
    pub fn is_empty(&self) -> bool {
        self.read.0.load(Ordering::Relaxed) == self.write.0.load(Ordering::Relaxed)
    }

    /// Whether the buffer looked full at the instant of the call. Advisory.
    pub fn is_full(&self) -> bool {
        let write = self.write.0.load(Ordering::Relaxed);
        (write + 1) % N == self.read.0.load(Ordering::Relaxed)
    }

    /// Number of stored values at the instant of the call. Advisory.
    pub fn len(&self) -> usize {
        let write = self.write.0.load(Ordering::Relaxed);
        let read = self.read.0.load(Ordering::Relaxed);
        (write + N - read) % N
    }

    /// Maximum number of values the buffer can hold: `N - 1`.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Split into a producer and a consumer that may live on different
    /// threads. This is the only allocation the buffer performs.
    pub fn split(self) -> (Producer<T, N>, Consumer<T, N>) {
        let ring = Arc::new(self);
        (
            Producer {
                ring: Arc::clone(&ring),
            },
            Consumer { ring },
        )
    }

    /// # Safety
    ///
    /// No other thread may call `push_shared` concurrently.
    unsafe fn push_shared(&self, value: T) -> Result<(), T> {
        // Only this thread stores `write`, so Relaxed sees the latest value.
        let write = self.write.0.load(Ordering::Relaxed);
        let next = (write + 1) % N;
        // Acquire pairs with the consumer's Release store of `read`: once we
        // see the slot freed, its previous value has been moved out.
        if next == self.read.0.load(Ordering::Acquire) {
            return Err(value);
        }
        // SAFETY: slot `write` lies outside `[read, write)`, so the consumer
        // will not touch it until the store below publishes it, and we are
        // the only producer.
        unsafe { (*self.slots[write].get()).write(value) };
        // Release publishes the slot contents before the new index.
        self.write.0.store(next, Ordering::Release);
        Ok(())
    }

    /// # Safety
    ///
    /// No other thread may call `pop_shared` concurrently.
    unsafe fn pop_shared(&self) -> Option<T> {
        let read = self.read.0.load(Ordering::Relaxed);
        // Acquire pairs with the producer's Release store of `write`.
        if read == self.write.0.load(Ordering::Acquire) {
            return None;
        }
        // SAFETY: slot `read` lies in `[read, write)`, so it was initialised
        // by a push that happened-before the Acquire load above. The producer
        // will not overwrite it until we publish the new `read` below.
        let value = unsafe { (*self.slots[read].get()).assume_init_read() };
        // Release hands the now-empty slot back to the producer.
        self.read.0.store((read + 1) % N, Ordering::Release);
        Some(value)
    }
}

impl<T, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Drop for RingBuffer<T, N> {
    fn drop(&mut self) {
        if std::mem::needs_drop::<T>() {
            while self.pop().is_some() {}
        }
    }
}

impl<T, const N: usize> fmt::Debug for RingBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("slots", &N)
            .field("len", &self.len())
            .finish()
    }
}

/// The writing half of a split [`RingBuffer`].
pub struct Producer<T, const N: usize> {
    ring: Arc<RingBuffer<T, N>>,
}

impl<T, const N: usize> Producer<T, N> {
    /// Append a value without blocking. Returns it back in `Err` if the
    /// buffer is full; the caller decides whether to retry or drop it.
    pub fn push(&mut self, value: T) -> Result<(), T> {
        // SAFETY: `Producer` is not `Clone` and `push` takes `&mut self`, so
        // this is the only thread pushing into `ring`.
        unsafe { self.ring.push_shared(value) }
    }

    /// Advisory: whether the buffer looked full.
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Advisory: number of values waiting for the consumer.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Advisory: whether the consumer has drained everything.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Maximum number of values the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Whether the [`Consumer`] has been dropped.
    pub fn is_abandoned(&self) -> bool {
        is_sole_owner(&self.ring)
    }
}

impl<T, const N: usize> fmt::Debug for Producer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer").field("ring", &self.ring).finish()
    }
}

/// The reading half of a split [`RingBuffer`].
pub struct Consumer<T, const N: usize> {
    ring: Arc<RingBuffer<T, N>>,
}

impl<T, const N: usize> Consumer<T, N> {
    /// Remove the oldest value without blocking, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        // SAFETY: `Consumer` is not `Clone` and `pop` takes `&mut self`, so
        // this is the only thread popping from `ring`.
        unsafe { self.ring.pop_shared() }
    }

    /// Advisory: whether the buffer looked empty.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Advisory: number of values ready to pop.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Maximum number of values the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Whether the [`Producer`] has been dropped. Every value it pushed
    /// before dropping is visible to the next [`pop`](Consumer::pop).
    pub fn is_abandoned(&self) -> bool {
        is_sole_owner(&self.ring)
    }
}

impl<T, const N: usize> fmt::Debug for Consumer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer").field("ring", &self.ring).finish()
    }
}

/// `true` once the other endpoint's `Arc` has been dropped.
///
/// `strong_count` is a relaxed load; the acquire fence pairs with the
/// release decrement in `Arc::drop`, so writes the other side made before
/// dropping (including its last index store) are visible afterwards.
fn is_sole_owner<T, const N: usize>(ring: &Arc<RingBuffer<T, N>>) -> bool {
    let alone = Arc::strong_count(ring) == 1;
    if alone {
        fence(Ordering::Acquire);
    }
    alone
}

// Compile-time assertion: endpoints can move to other threads.
const _: fn() = || {
    fn assert<T: Send>() {}
    assert::<Producer<u64, 8>>();
    assert::<Consumer<u64, 8>>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_on_fresh_buffer_fails() {
        let mut ring = RingBuffer::<i32, 4>::new();
        assert!(ring.is_empty());
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn basic_push_pop() {
        let mut ring = RingBuffer::<i32, 4>::new();
        assert!(ring.push(10).is_ok());
        assert!(ring.push(20).is_ok());
        assert_eq!(ring.pop(), Some(10));
        assert_eq!(ring.pop(), Some(20));
        assert!(ring.is_empty());
    }

    #[test]
    fn one_slot_is_sacrificed() {
        let mut ring = RingBuffer::<i32, 4>::new();
        assert_eq!(ring.capacity(), 3);
        assert!(ring.push(1).is_ok());
        assert!(ring.push(2).is_ok());
        assert!(ring.push(3).is_ok());
        assert!(ring.is_full());
        assert_eq!(ring.push(4), Err(4));
        assert_eq!(ring.len(), 3);

        assert_eq!(ring.pop(), Some(1));
        assert_eq!(ring.pop(), Some(2));
    }

    #[test]
    fn fifo_order_of_five() {
        let mut ring = RingBuffer::<i32, 10>::new();
        for i in 0..5 {
            ring.push(i).unwrap();
        }
        for i in 0..5 {
            assert_eq!(ring.pop(), Some(i));
        }
    }

    #[test]
    fn two_slots_hold_one_value() {
        let mut ring = RingBuffer::<u8, 2>::new();
        assert!(ring.push(1).is_ok());
        assert_eq!(ring.push(2), Err(2));
        assert_eq!(ring.pop(), Some(1));
        assert!(ring.push(3).is_ok());
        assert_eq!(ring.pop(), Some(3));
    }

    #[test]
    fn indices_wrap_around() {
        let mut ring = RingBuffer::<usize, 3>::new();
        for i in 0..100 {
            ring.push(i).unwrap();
            ring.push(i + 1000).unwrap();
            assert_eq!(ring.pop(), Some(i));
            assert_eq!(ring.pop(), Some(i + 1000));
            assert!(ring.is_empty());
        }
    }

    #[test]
    fn failed_push_leaves_state_untouched() {
        let mut ring = RingBuffer::<String, 2>::new();
        ring.push("kept".to_string()).unwrap();
        let rejected = ring.push("rejected".to_string()).unwrap_err();
        assert_eq!(rejected, "rejected");
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.pop().as_deref(), Some("kept"));
    }

    #[test]
    fn drop_releases_unpopped_values() {
        let tracker = Arc::new(());
        {
            let mut ring = RingBuffer::<Arc<()>, 8>::new();
            for _ in 0..5 {
                ring.push(Arc::clone(&tracker)).unwrap();
            }
            drop(ring.pop());
            assert_eq!(Arc::strong_count(&tracker), 5);
        }
        assert_eq!(Arc::strong_count(&tracker), 1);
    }

    #[test]
    fn split_endpoints_share_state() {
        let (mut tx, mut rx) = RingBuffer::<u32, 4>::new().split();
        assert_eq!(tx.capacity(), 3);
        tx.push(7).unwrap();
        assert_eq!(rx.len(), 1);
        assert_eq!(rx.pop(), Some(7));
        assert!(tx.is_empty());
    }

    #[test]
    fn abandonment_is_visible_to_the_other_side() {
        let (mut tx, rx) = RingBuffer::<u32, 4>::new().split();
        assert!(!tx.is_abandoned());
        drop(rx);
        assert!(tx.is_abandoned());
        // Pushing into an abandoned buffer is still well-defined.
        assert!(tx.push(1).is_ok());
    }
}
