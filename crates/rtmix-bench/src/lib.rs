//! Benchmark profiles for rtmix.
//!
//! - [`reference_inputs`]: two seeded stereo inputs of a given length
//! - [`reference_config`]: engine settings sized for those inputs

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rtmix_arena::ArenaConfig;
use rtmix_engine::{session_bytes, EngineConfig};
use rtmix_test_utils::{noise, sine, stereo};
use rtmix_wav::WavData;

/// Sample rate of the reference inputs.
pub const REFERENCE_RATE: u32 = 48_000;

/// Two stereo inputs of `frames` frames: a sine and seeded noise.
pub fn reference_inputs(frames: usize, seed: u64) -> (WavData, WavData) {
    (
        stereo(sine(frames, 2, 440.0, REFERENCE_RATE, 0.7), REFERENCE_RATE),
        stereo(noise(frames * 2, 0.3, seed), REFERENCE_RATE),
    )
}

/// Engine settings with an arena just large enough for `frames` stereo
/// frames and 10 ms fades at both ends.
pub fn reference_config(frames: usize) -> EngineConfig {
    EngineConfig {
        arena: ArenaConfig::new(session_bytes(frames * 2)),
        fade_in_frames: 480,
        fade_out_frames: 480,
        ..EngineConfig::default()
    }
}
