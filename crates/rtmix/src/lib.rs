//! rtmix: real-time-safe audio primitives.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all rtmix sub-crates. For most users, adding `rtmix` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use rtmix::prelude::*;
//!
//! // Scratch memory for one block, reclaimed in bulk.
//! let mut arena = Arena::new(64 * 1024);
//! let block = arena.alloc_slice_fill(256, 1.0f32).unwrap();
//! GainNode::new(0.5).process(&mut AudioBuffer::mono(block));
//! assert!(block.iter().all(|&s| s == 0.5));
//! arena.reset();
//!
//! // Hand values to another thread without locks.
//! let (mut tx, mut rx) = RingBuffer::<f32, 4>::new().split();
//! std::thread::spawn(move || tx.push(0.25).unwrap()).join().unwrap();
//! assert_eq!(rx.pop(), Some(0.25));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `rtmix-arena` | Bump arena, generation-checked slice handles |
//! | [`ring`] | `rtmix-ring` | Lock-free SPSC ring buffer and its endpoints |
//! | [`dsp`] | `rtmix-dsp` | `AudioBuffer`, `AudioNode`, gain, fade and mix nodes |
//! | [`wav`] | `rtmix-wav` | 16-bit PCM WAV decoding and encoding |
//! | [`engine`] | `rtmix-engine` | Two-input mixing engine, offline and streaming |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Fixed-capacity bump arena (`rtmix-arena`).
pub use rtmix_arena as arena;

/// Lock-free single-producer/single-consumer ring buffer (`rtmix-ring`).
///
/// Split a [`ring::RingBuffer`] into a [`ring::Producer`] and a
/// [`ring::Consumer`] to pass values between two threads.
pub use rtmix_ring as ring;

/// In-place DSP nodes (`rtmix-dsp`).
pub use rtmix_dsp as dsp;

/// 16-bit PCM WAV I/O (`rtmix-wav`).
pub use rtmix_wav as wav;

/// Session driver (`rtmix-engine`).
///
/// [`engine::AudioEngine`] mixes two inputs inside one arena, either in a
/// single pass or through a ring between two threads.
pub use rtmix_engine as engine;

/// Common imports for typical rtmix usage.
///
/// ```rust
/// use rtmix::prelude::*;
/// ```
pub mod prelude {
    // Memory
    pub use rtmix_arena::{Arena, ArenaConfig, SliceHandle};

    // Lock-free transport
    pub use rtmix_ring::{Consumer, Producer, RingBuffer};

    // DSP
    pub use rtmix_dsp::{AudioBuffer, AudioNode, FadeDirection, FadeNode, GainNode, MixerNode};

    // I/O
    pub use rtmix_wav::{read_wav, write_wav, WavData};

    // Engine
    pub use rtmix_engine::{AudioEngine, EngineConfig, ProcessingMode, SessionReport, StreamStats};

    // Errors
    pub use rtmix_arena::ArenaError;
    pub use rtmix_engine::{ConfigError, EngineError};
    pub use rtmix_wav::WavError;
}
