//! Two-input summing mixer.

use crate::{AudioBuffer, LANES};

/// Sums two inputs into an output, sample by sample.
///
/// Only the common prefix is mixed: `len = min(in1, in2, out)`. Output
/// samples past `len` are left as they were.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MixerNode;

impl MixerNode {
    /// Mix two buffers into `out`. Returns the number of samples written.
    pub fn mix(in1: &AudioBuffer<'_>, in2: &AudioBuffer<'_>, out: &mut AudioBuffer<'_>) -> usize {
        Self::mix_slices(in1.samples(), in2.samples(), out.samples_mut())
    }

    /// Mix two slices into `out`. Returns the number of samples written.
    pub fn mix_slices(in1: &[f32], in2: &[f32], out: &mut [f32]) -> usize {
        let len = in1.len().min(in2.len()).min(out.len());
        let (a, b, out) = (&in1[..len], &in2[..len], &mut out[..len]);

        let mut out_chunks = out.chunks_exact_mut(LANES);
        let mut a_chunks = a.chunks_exact(LANES);
        let mut b_chunks = b.chunks_exact(LANES);
        for ((o, x), y) in (&mut out_chunks).zip(&mut a_chunks).zip(&mut b_chunks) {
            for i in 0..LANES {
                o[i] = x[i] + y[i];
            }
        }
        let tail = out_chunks.into_remainder();
        for ((o, x), y) in tail
            .iter_mut()
            .zip(a_chunks.remainder())
            .zip(b_chunks.remainder())
        {
            *o = x + y;
        }
        len
    }
}
