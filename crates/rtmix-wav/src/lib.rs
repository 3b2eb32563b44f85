//! 16-bit PCM WAV input and output for rtmix.
//!
//! Samples are exchanged as interleaved `f32` in `[-1.0, 1.0]`:
//!
//! - decoding maps each `i16` to `v / 32768.0`,
//! - encoding maps each `f32` to `clamp(v, -1, 1) * 32767.0`, truncated.
//!
//! The decoder walks the RIFF chunk list, so files with `LIST`, `fact` or
//! other auxiliary chunks before `data` load fine. The encoder always
//! writes the canonical 44-byte header followed by the sample data.
//!
//! # Format
//!
//! ```text
//! "RIFF" [size u32] "WAVE"
//! "fmt " [16 u32] [format=1 u16] [channels u16] [rate u32]
//!        [byte_rate u32] [block_align u16] [bits=16 u16]
//! "data" [size u32] [i16 samples...]
//! ```
//!
//! All integers are little-endian.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod reader;
pub mod types;
pub mod writer;

pub use error::WavError;
pub use reader::{decode, read_wav};
pub use types::WavData;
pub use writer::{encode, write_wav};

/// Length of the canonical header the encoder writes.
pub const HEADER_LEN: usize = 44;

/// `wFormatTag` for integer PCM.
pub const PCM_FORMAT: u16 = 1;

/// The only supported sample width.
pub const BITS_PER_SAMPLE: u16 = 16;
