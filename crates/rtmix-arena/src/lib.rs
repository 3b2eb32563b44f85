//! Fixed-capacity bump arena for real-time audio processing.
//!
//! An [`Arena`] reserves one contiguous byte region at construction and
//! serves allocations by advancing a cursor through it. There is no
//! per-allocation free: the whole region is reclaimed at once by
//! [`Arena::reset`] or when the arena is dropped. After construction the
//! arena never touches the heap, so it is safe to allocate from on an
//! audio thread.
//!
//! # Architecture
//!
//! ```text
//! Arena
//! ├── RawRegion (owned Box<[MaybeUninit<u8>]>, never reallocated)
//! ├── cursor: Cell<usize>      (bump pointer, 0..=capacity)
//! ├── generation: u64          (bumped on every reset)
//! └── arena_id: u64            (process-unique, stamped into handles)
//! ```
//!
//! # Two ways to hold an allocation
//!
//! - **Borrowed regions** (`&mut [MaybeUninit<u8>]`, `&mut T`, `&mut [T]`)
//!   are tied to `&Arena`. [`Arena::reset`] takes `&mut self`, so the
//!   borrow checker rejects any reset while a region is still alive.
//! - **Detached handles** ([`SliceHandle`]) are `Copy` and carry no
//!   lifetime. They record the generation they were issued in, and
//!   resolving one after a reset returns [`ArenaError::StaleHandle`].
//!
//! # Threading
//!
//! The arena is not internally thread-safe. It is `Send` but not `Sync`:
//! move it to the thread that owns the session, and allocate only there.
//!
//! # Safety
//!
//! The unchecked pointer accessors live in the private `raw` module;
//! [`arena`] is their only caller. Both modules opt back in to `unsafe`
//! explicitly, and every block carries a `// SAFETY:` comment tying it to
//! the cursor invariant maintained by [`Arena`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod handle;
mod raw;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::SliceHandle;
