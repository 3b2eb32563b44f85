//! Constant gain.

use crate::{AudioBuffer, AudioNode, LANES};

/// Multiplies every sample by a fixed factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GainNode {
    gain: f32,
}

impl GainNode {
    /// Create a node applying `gain` (1.0 is unity).
    pub fn new(gain: f32) -> Self {
        Self { gain }
    }

    /// Current factor.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Change the factor; takes effect on the next `process` call.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }

    /// Apply the gain to a bare slice.
    pub fn apply(&self, samples: &mut [f32]) {
        let gain = self.gain;
        let mut chunks = samples.chunks_exact_mut(LANES);
        for chunk in &mut chunks {
            for s in chunk {
                *s *= gain;
            }
        }
        for s in chunks.into_remainder() {
            *s *= gain;
        }
    }
}

impl Default for GainNode {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl AudioNode for GainNode {
    fn process(&mut self, buffer: &mut AudioBuffer<'_>) {
        self.apply(buffer.samples_mut());
    }
}
