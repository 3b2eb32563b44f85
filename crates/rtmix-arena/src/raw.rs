//! Owned backing storage and the unchecked accessors built on it.
//!
//! This is the only module in the crate allowed to use `unsafe`. Every
//! accessor takes a byte range that the caller ([`Arena`](crate::Arena))
//! has already bounds-checked and proven disjoint from every other live
//! borrow: the cursor only moves forward between resets, and `reset`
//! requires `&mut Arena`.

#![allow(unsafe_code)]
#![allow(clippy::mut_from_ref)]

use std::alloc::{self, Layout};
use std::mem::MaybeUninit;
use std::ptr::NonNull;

/// Alignment of the region's first byte.
///
/// Padding for any alignment up to this value depends only on the cursor
/// offset, so `used()` is the same wherever the allocator put the region.
pub(crate) const REGION_ALIGN: usize = 64;

/// A heap region allocated once and freed once, never reallocated.
pub(crate) struct RawRegion {
    ptr: NonNull<MaybeUninit<u8>>,
    len: usize,
    layout: Layout,
}

// SAFETY: `RawRegion` uniquely owns its allocation. Sending it to another
// thread transfers that ownership; no other value aliases the pointer.
unsafe impl Send for RawRegion {}

impl RawRegion {
    /// Reserve `len` uninitialised bytes starting on a [`REGION_ALIGN`]
    /// boundary.
    ///
    /// # Panics
    ///
    /// Panics if `len` rounded up to [`REGION_ALIGN`] exceeds `isize::MAX`.
    pub(crate) fn new(len: usize) -> Self {
        // A zero-sized layout is not allowed by the global allocator.
        let layout = match Layout::from_size_align(len.max(1), REGION_ALIGN) {
            Ok(layout) => layout,
            Err(_) => panic!("arena capacity {len} exceeds isize::MAX"),
        };
        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        let Some(ptr) = NonNull::new(raw.cast::<MaybeUninit<u8>>()) else {
            alloc::handle_alloc_error(layout)
        };
        Self { ptr, len, layout }
    }

    /// Absolute address of the first byte.
    pub(crate) fn base_addr(&self) -> usize {
        self.ptr.as_ptr() as usize
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Borrow `len` raw bytes starting at `offset`.
    ///
    /// # Safety
    ///
    /// `offset + len <= self.len()`, and no other live reference may
    /// overlap `[offset, offset + len)` for `'a`.
    pub(crate) unsafe fn bytes_mut<'a>(&'a self, offset: usize, len: usize) -> &'a mut [MaybeUninit<u8>] {
        debug_assert!(offset + len <= self.len);
        // SAFETY: in bounds per the caller contract; the range is exclusive
        // to the returned borrow.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr().add(offset), len) }
    }

    /// Move `value` into the region at `offset`.
    ///
    /// # Safety
    ///
    /// `offset + size_of::<T>() <= self.len()`, `base_addr() + offset` is
    /// aligned for `T`, and the range is not borrowed elsewhere for `'a`.
    pub(crate) unsafe fn write<'a, T>(&'a self, offset: usize, value: T) -> &'a mut T {
        debug_assert!(offset + std::mem::size_of::<T>() <= self.len);
        // SAFETY: in bounds, aligned and exclusive per the caller contract.
        unsafe {
            let slot = self.ptr.as_ptr().add(offset).cast::<T>();
            slot.write(value);
            &mut *slot
        }
    }

    /// Initialise `len` copies of `value` starting at `offset`.
    ///
    /// # Safety
    ///
    /// Same contract as [`RawRegion::write`], for `len * size_of::<T>()` bytes.
    pub(crate) unsafe fn fill<'a, T: Copy>(&'a self, offset: usize, len: usize, value: T) -> &'a mut [T] {
        // SAFETY: in bounds, aligned and exclusive per the caller contract.
        unsafe {
            let first = self.ptr.as_ptr().add(offset).cast::<T>();
            for i in 0..len {
                first.add(i).write(value);
            }
            std::slice::from_raw_parts_mut(first, len)
        }
    }

    /// Copy `src` into the region at `offset`.
    ///
    /// # Safety
    ///
    /// Same contract as [`RawRegion::write`], for `size_of_val(src)` bytes.
    /// `src` cannot overlap the destination because the destination range
    /// has never been handed out in the current generation.
    pub(crate) unsafe fn copy_from<'a, T: Copy>(&'a self, offset: usize, src: &[T]) -> &'a mut [T] {
        // SAFETY: in bounds, aligned, exclusive and non-overlapping per the
        // caller contract.
        unsafe {
            let first = self.ptr.as_ptr().add(offset).cast::<T>();
            std::ptr::copy_nonoverlapping(src.as_ptr(), first, src.len());
            std::slice::from_raw_parts_mut(first, src.len())
        }
    }

    /// Reborrow an initialised `[T]` previously written at `offset`.
    ///
    /// # Safety
    ///
    /// The range holds `len` initialised, aligned `T` values written in the
    /// current generation, and no mutable borrow of it is live for `'a`.
    pub(crate) unsafe fn slice<'a, T>(&'a self, offset: usize, len: usize) -> &'a [T] {
        // SAFETY: initialised, aligned and shared per the caller contract.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr().add(offset).cast::<T>(), len) }
    }

    /// Mutable counterpart of [`RawRegion::slice`].
    ///
    /// # Safety
    ///
    /// As for [`RawRegion::slice`], and no other borrow of the range is live.
    pub(crate) unsafe fn slice_mut<'a, T>(&'a self, offset: usize, len: usize) -> &'a mut [T] {
        // SAFETY: initialised, aligned and exclusive per the caller contract.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr().add(offset).cast::<T>(), len) }
    }
}

impl Drop for RawRegion {
    fn drop(&mut self) {
        // SAFETY: `ptr` came from `alloc::alloc(self.layout)` in `new` and is
        // freed exactly once, here. `MaybeUninit<u8>` has no drop glue.
        unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), self.layout) };
    }
}
