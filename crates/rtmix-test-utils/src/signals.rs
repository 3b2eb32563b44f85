//! Deterministic sample generators.
//!
//! All generators return interleaved samples. Multi-channel outputs
//! repeat the same value across a frame.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `frames` frames of a sine at `freq` Hz and `amplitude`.
pub fn sine(frames: usize, channels: usize, freq: f32, sample_rate: u32, amplitude: f32) -> Vec<f32> {
    let step = std::f32::consts::TAU * freq / sample_rate as f32;
    (0..frames)
        .flat_map(|i| std::iter::repeat_n((i as f32 * step).sin() * amplitude, channels))
        .collect()
}

/// `frames` frames of a constant value.
pub fn constant(frames: usize, channels: usize, value: f32) -> Vec<f32> {
    vec![value; frames * channels]
}

/// A linear ramp from `from` to `to` over `frames` frames.
pub fn ramp(frames: usize, channels: usize, from: f32, to: f32) -> Vec<f32> {
    let span = frames.saturating_sub(1).max(1) as f32;
    (0..frames)
        .flat_map(|i| {
            let v = from + (to - from) * (i as f32 / span);
            std::iter::repeat_n(v, channels)
        })
        .collect()
}

/// Uniform noise in `[-amplitude, amplitude)`, reproducible from `seed`.
pub fn noise(samples: usize, amplitude: f32, seed: u64) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..samples)
        .map(|_| (rng.gen::<f32>() * 2.0 - 1.0) * amplitude)
        .collect()
}
