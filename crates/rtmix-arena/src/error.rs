//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The allocation (plus alignment padding) does not fit in the
    /// remaining space. The cursor is left untouched.
    CapacityExceeded {
        /// Number of bytes requested, excluding padding.
        requested: usize,
        /// Padding that would have been inserted to satisfy alignment.
        padding: usize,
        /// Bytes in use at the time of the request.
        used: usize,
        /// Total capacity of the arena in bytes.
        capacity: usize,
    },
    /// A [`SliceHandle`](crate::SliceHandle) issued before the most recent
    /// [`reset`](crate::Arena::reset).
    StaleHandle {
        /// The generation encoded in the handle.
        handle_generation: u64,
        /// The arena's current generation.
        current_generation: u64,
    },
    /// A [`SliceHandle`](crate::SliceHandle) issued by a different arena.
    ForeignHandle {
        /// Identifier of the arena that issued the handle.
        handle_arena: u64,
        /// Identifier of the arena it was resolved against.
        arena: u64,
    },
    /// An [`ArenaConfig`](crate::ArenaConfig) failed validation.
    InvalidConfig {
        /// Description of the validation failure.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                padding,
                used,
                capacity,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes \
                     (+{padding} padding) with {used} of {capacity} bytes in use"
                )
            }
            Self::StaleHandle {
                handle_generation,
                current_generation,
            } => {
                write!(
                    f,
                    "stale handle: generation {handle_generation}, current {current_generation}"
                )
            }
            Self::ForeignHandle { handle_arena, arena } => {
                write!(
                    f,
                    "handle from arena {handle_arena} resolved against arena {arena}"
                )
            }
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
        }
    }
}

impl Error for ArenaError {}
