//! The bump arena itself.
//!
//! [`Arena`] owns a `RawRegion` and a cursor. Allocation computes the
//! forward padding needed to align the cursor's absolute address, checks
//! the request against the remaining space, then advances the cursor.
//! Nothing is ever freed individually.
//!
//! This module calls the unchecked accessors in `raw`, so it opts back in
//! to `unsafe`. Each call site states which arena invariant discharges the
//! accessor's contract.

#![allow(unsafe_code)]
// Disjoint `&mut` regions from `&self` are the point of a bump arena.
#![allow(clippy::mut_from_ref)]

use std::alloc::Layout;
use std::cell::Cell;
use std::fmt;
use std::mem::{align_of, size_of, MaybeUninit};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::SliceHandle;
use crate::raw::RawRegion;

/// Source of process-unique arena identifiers. Zero is never issued.
static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(1);

/// A fixed-capacity bump allocator.
///
/// Allocations are served by advancing a cursor through a region reserved
/// once at construction. The region is released as a whole when the arena
/// is dropped; [`reset`](Arena::reset) rewinds the cursor so the same
/// memory is reused by the next session.
///
/// The arena never runs destructors. Typed allocation is therefore
/// restricted to `T: Copy`, which the compiler only grants to types
/// without drop glue. Types that need teardown must be owned elsewhere.
///
/// `Arena` is neither `Clone` nor `Sync`. A copy would alias the same
/// storage with an independent cursor, and concurrent allocation would
/// race on the cursor.
///
/// ```compile_fail
/// let arena = rtmix_arena::Arena::new(64);
/// let copy = arena.clone();
/// ```
///
/// ```compile_fail
/// fn share<T: Sync>(_: &T) {}
/// share(&rtmix_arena::Arena::new(64));
/// ```
///
/// ```compile_fail
/// let arena = rtmix_arena::Arena::new(64);
/// std::thread::scope(|s| {
///     s.spawn(|| arena.used());
/// });
/// ```
///
/// # Example
///
/// ```
/// use rtmix_arena::Arena;
///
/// let mut arena = Arena::new(1024);
/// let samples = arena.alloc_slice_fill(64, 0.0f32).unwrap();
/// samples[0] = 1.0;
/// assert!(arena.used() >= 64 * 4);
///
/// arena.reset();
/// assert_eq!(arena.used(), 0);
/// ```
pub struct Arena {
    region: RawRegion,
    /// Bump pointer: bytes consumed so far, padding included.
    cursor: Cell<usize>,
    /// Largest cursor value observed since construction.
    peak: Cell<usize>,
    /// Bumped on every reset; stamped into [`SliceHandle`]s.
    generation: u64,
    arena_id: u64,
}

// Compile-time assertion: Arena can move between threads.
const _: fn() = || {
    fn assert<T: Send>() {}
    assert::<Arena>();
};

impl Arena {
    /// Reserve a region of `capacity` bytes.
    ///
    /// This is the only heap allocation the arena ever performs.
    ///
    /// # Panics
    ///
    /// Panics (or aborts) if the system cannot provide `capacity` bytes,
    /// or if `capacity` exceeds `isize::MAX`. Use
    /// [`with_config`](Arena::with_config) to validate first.
    pub fn new(capacity: usize) -> Self {
        let region = RawRegion::new(capacity);
        let arena_id = NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed);
        tracing::info!(arena_id, capacity_kib = capacity / 1024, "arena reserved");
        Self {
            region,
            cursor: Cell::new(0),
            peak: Cell::new(0),
            generation: 0,
            arena_id,
        }
    }

    /// Validate `config` and reserve a region of the configured size.
    pub fn with_config(config: &ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self::new(config.capacity_bytes))
    }

    /// Allocate `size` bytes whose start address is a multiple of `align`.
    ///
    /// The returned bytes are uninitialised (or hold whatever the previous
    /// generation left behind). On failure the cursor is not moved.
    ///
    /// # Panics
    ///
    /// Panics if `align` is not a power of two.
    pub fn allocate(&self, size: usize, align: usize) -> Result<&mut [MaybeUninit<u8>], ArenaError> {
        let offset = self.reserve(size, align)?;
        // SAFETY: `reserve` returned an in-bounds range that starts at or
        // after every range handed out in this generation, so nothing else
        // borrows it until `reset(&mut self)` ends all borrows.
        Ok(unsafe { self.region.bytes_mut(offset, size) })
    }

    /// Allocate space described by `layout`.
    pub fn allocate_layout(&self, layout: Layout) -> Result<&mut [MaybeUninit<u8>], ArenaError> {
        self.allocate(layout.size(), layout.align())
    }

    /// Move `value` into the arena and return a reference to it.
    pub fn emplace<T: Copy>(&self, value: T) -> Result<&mut T, ArenaError> {
        let offset = self.reserve(size_of::<T>(), align_of::<T>())?;
        // SAFETY: fresh, exclusive range of exactly `size_of::<T>()` bytes,
        // aligned for `T` by `reserve`.
        Ok(unsafe { self.region.write(offset, value) })
    }

    /// Construct a value in place from `init`.
    ///
    /// Space is reserved before `init` runs, so a full arena fails without
    /// calling it.
    pub fn emplace_with<T: Copy, F: FnOnce() -> T>(&self, init: F) -> Result<&mut T, ArenaError> {
        let offset = self.reserve(size_of::<T>(), align_of::<T>())?;
        // SAFETY: as in `emplace`.
        Ok(unsafe { self.region.write(offset, init()) })
    }

    /// Allocate `len` elements, each initialised to `value`.
    pub fn alloc_slice_fill<T: Copy>(&self, len: usize, value: T) -> Result<&mut [T], ArenaError> {
        let offset = self.reserve(self.slice_bytes::<T>(len)?, align_of::<T>())?;
        // SAFETY: fresh, exclusive range of `len * size_of::<T>()` bytes,
        // aligned for `T`.
        Ok(unsafe { self.region.fill(offset, len, value) })
    }

    /// Allocate a copy of `src`.
    pub fn alloc_slice_copy<T: Copy>(&self, src: &[T]) -> Result<&mut [T], ArenaError> {
        let offset = self.reserve(self.slice_bytes::<T>(src.len())?, align_of::<T>())?;
        // SAFETY: fresh, exclusive range sized and aligned for `src`. It
        // cannot overlap `src`: borrowed arena memory is never handed out
        // twice in one generation.
        Ok(unsafe { self.region.copy_from(offset, src) })
    }

    /// Allocate `len` elements initialised to `value` and return a
    /// detached handle instead of a borrow.
    pub fn alloc_handle<T: Copy>(&self, len: usize, value: T) -> Result<SliceHandle<T>, ArenaError> {
        let offset = self.reserve(self.slice_bytes::<T>(len)?, align_of::<T>())?;
        // SAFETY: fresh, exclusive, aligned range; the returned borrow is
        // dropped immediately and only the handle escapes.
        unsafe { self.region.fill(offset, len, value) };
        Ok(SliceHandle::new(self.arena_id, self.generation, offset, len))
    }

    /// Resolve a handle to a shared slice.
    ///
    /// Fails with [`ArenaError::StaleHandle`] if the arena has been reset
    /// since the handle was issued, or [`ArenaError::ForeignHandle`] if it
    /// came from another arena.
    pub fn get<T: Copy>(&self, handle: SliceHandle<T>) -> Result<&[T], ArenaError> {
        self.check(&handle)?;
        // SAFETY: same arena and generation, so the range still holds the
        // `len` aligned `T` values written by `alloc_handle`. Mutable access
        // to it is only reachable through `get_mut(&mut self)`.
        Ok(unsafe { self.region.slice(handle.offset, handle.len) })
    }

    /// Resolve a handle to a mutable slice.
    pub fn get_mut<T: Copy>(&mut self, handle: SliceHandle<T>) -> Result<&mut [T], ArenaError> {
        self.check(&handle)?;
        // SAFETY: as in `get`; `&mut self` rules out every other borrow.
        Ok(unsafe { self.region.slice_mut(handle.offset, handle.len) })
    }

    /// Rewind the cursor to zero and start a new generation.
    ///
    /// Memory is not zeroed. Taking `&mut self` ends every borrowed region;
    /// outstanding [`SliceHandle`]s become stale.
    ///
    /// A region borrowed before the reset cannot be used after it:
    ///
    /// ```compile_fail
    /// let mut arena = rtmix_arena::Arena::new(64);
    /// let bytes = arena.allocate(8, 8).unwrap();
    /// arena.reset();
    /// bytes[0].write(1);
    /// ```
    pub fn reset(&mut self) {
        let released = self.cursor.replace(0);
        self.generation += 1;
        tracing::debug!(
            arena_id = self.arena_id,
            generation = self.generation,
            released,
            "arena reset"
        );
    }

    /// Bytes consumed so far, alignment padding included.
    pub fn used(&self) -> usize {
        self.cursor.get()
    }

    /// Total size of the region in bytes.
    pub fn capacity(&self) -> usize {
        self.region.len()
    }

    /// Bytes left before the arena is exhausted (ignoring future padding).
    pub fn remaining(&self) -> usize {
        self.capacity() - self.used()
    }

    /// Highest [`used`](Arena::used) value seen since construction.
    pub fn peak_used(&self) -> usize {
        self.peak.get()
    }

    /// Number of resets performed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Process-unique identifier of this arena.
    pub fn id(&self) -> u64 {
        self.arena_id
    }

    /// Claim `size` bytes aligned to `align`, returning their offset.
    fn reserve(&self, size: usize, align: usize) -> Result<usize, ArenaError> {
        assert!(
            align.is_power_of_two(),
            "arena alignment must be a power of two, got {align}"
        );
        let used = self.cursor.get();
        let capacity = self.region.len();
        // The region starts on a `REGION_ALIGN` boundary, so for smaller
        // alignments this equals offset-based padding. Larger ones still
        // land on a correctly aligned address.
        let addr = self.region.base_addr() + used;
        let padding = (align - addr % align) % align;

        match used
            .checked_add(padding)
            .and_then(|start| start.checked_add(size).map(|end| (start, end)))
        {
            Some((start, end)) if end <= capacity => {
                self.cursor.set(end);
                if end > self.peak.get() {
                    self.peak.set(end);
                }
                Ok(start)
            }
            _ => {
                tracing::debug!(
                    arena_id = self.arena_id,
                    requested = size,
                    padding,
                    used,
                    capacity,
                    "arena allocation rejected"
                );
                Err(ArenaError::CapacityExceeded {
                    requested: size,
                    padding,
                    used,
                    capacity,
                })
            }
        }
    }

    fn slice_bytes<T>(&self, len: usize) -> Result<usize, ArenaError> {
        size_of::<T>()
            .checked_mul(len)
            .ok_or_else(|| ArenaError::CapacityExceeded {
                requested: usize::MAX,
                padding: 0,
                used: self.used(),
                capacity: self.capacity(),
            })
    }

    fn check<T>(&self, handle: &SliceHandle<T>) -> Result<(), ArenaError> {
        if handle.arena_id != self.arena_id {
            return Err(ArenaError::ForeignHandle {
                handle_arena: handle.arena_id,
                arena: self.arena_id,
            });
        }
        if handle.generation != self.generation {
            return Err(ArenaError::StaleHandle {
                handle_generation: handle.generation,
                current_generation: self.generation,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.arena_id)
            .field("used", &self.used())
            .field("capacity", &self.capacity())
            .field("generation", &self.generation)
            .finish()
    }
}
