//! Detached, generation-scoped slice handles.
//!
//! A [`SliceHandle`] records where a typed slice lives inside an arena
//! without borrowing the arena. The `generation` field allows O(1)
//! staleness checks: every [`Arena::reset`](crate::Arena::reset) bumps the
//! arena's generation, so handles issued earlier no longer resolve.

use std::fmt;
use std::marker::PhantomData;

/// Location of a typed `[T]` allocation inside an [`Arena`](crate::Arena).
///
/// Handles are `Copy` and `'static`, so they can be stored in long-lived
/// structures. Resolve them with [`Arena::get`](crate::Arena::get) or
/// [`Arena::get_mut`](crate::Arena::get_mut).
#[must_use]
pub struct SliceHandle<T> {
    /// Identifier of the issuing arena.
    pub(crate) arena_id: u64,
    /// Arena generation when this allocation was made.
    pub(crate) generation: u64,
    /// Byte offset from the start of the arena region.
    pub(crate) offset: usize,
    /// Length of the allocation in `T` elements.
    pub(crate) len: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SliceHandle<T> {
    pub(crate) fn new(arena_id: u64, generation: u64, offset: usize, len: usize) -> Self {
        Self {
            arena_id,
            generation,
            offset,
            len,
            _marker: PhantomData,
        }
    }

    /// The generation this handle belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Length of the allocation in `T` elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte offset of the first element from the start of the arena.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<T> Clone for SliceHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceHandle<T> {}

impl<T> PartialEq for SliceHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.arena_id == other.arena_id
            && self.generation == other.generation
            && self.offset == other.offset
            && self.len == other.len
    }
}

impl<T> Eq for SliceHandle<T> {}

impl<T> fmt::Debug for SliceHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceHandle")
            .field("arena_id", &self.arena_id)
            .field("generation", &self.generation)
            .field("offset", &self.offset)
            .field("len", &self.len)
            .finish()
    }
}

impl<T> fmt::Display for SliceHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SliceHandle(arena={}, gen={}, off={}, len={})",
            self.arena_id, self.generation, self.offset, self.len
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_accessors() {
        let h: SliceHandle<f32> = SliceHandle::new(1, 42, 1024, 256);
        assert_eq!(h.generation(), 42);
        assert_eq!(h.len(), 256);
        assert_eq!(h.offset(), 1024);
        assert!(!h.is_empty());
    }

    #[test]
    fn empty_handle() {
        let h: SliceHandle<u8> = SliceHandle::new(1, 0, 0, 0);
        assert!(h.is_empty());
    }

    #[test]
    fn copies_compare_equal() {
        let h: SliceHandle<f32> = SliceHandle::new(7, 3, 16, 4);
        let copy = h;
        assert_eq!(h, copy);
        assert_ne!(h, SliceHandle::new(7, 4, 16, 4));
    }

    #[test]
    fn display_mentions_generation() {
        let h: SliceHandle<f32> = SliceHandle::new(2, 9, 0, 8);
        assert_eq!(h.to_string(), "SliceHandle(arena=2, gen=9, off=0, len=8)");
    }
}
