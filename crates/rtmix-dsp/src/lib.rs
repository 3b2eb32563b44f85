//! Allocation-free DSP nodes for rtmix.
//!
//! Every node operates in place on an [`AudioBuffer`], a borrowed view of
//! interleaved `f32` samples. Nodes never allocate, lock or keep the
//! borrow past the call, so they may run on a real-time thread.
//!
//! Hot loops walk the buffer in chunks of [`LANES`] samples followed by a
//! scalar tail. The chunked form is what the compiler turns into SIMD; it
//! produces the same values as a plain per-sample loop.
//!
//! # Nodes
//!
//! | Node | Effect |
//! |------|--------|
//! | [`GainNode`] | multiply every sample by a constant |
//! | [`FadeNode`] | linear fade-in or fade-out, stateful across calls |
//! | [`MixerNode`] | sum two inputs into an output |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod fade;
pub mod gain;
pub mod mixer;
pub mod node;

pub use buffer::AudioBuffer;
pub use fade::{FadeDirection, FadeNode};
pub use gain::GainNode;
pub use mixer::MixerNode;
pub use node::AudioNode;

/// Chunk width of the vectorisable inner loops (one AVX register of `f32`).
pub const LANES: usize = 8;
