//! Borrowed interleaved sample buffer.

/// A mutable view over interleaved `f32` samples.
///
/// The buffer does not own its storage; it typically borrows a slice
/// carved from an `rtmix_arena::Arena` or a block popped from a ring.
/// `channels` describes the interleaving: sample `i` belongs to frame
/// `i / channels` and channel `i % channels`.
#[derive(Debug)]
pub struct AudioBuffer<'a> {
    data: &'a mut [f32],
    channels: usize,
}

impl<'a> AudioBuffer<'a> {
    /// Wrap `data` as a buffer with `channels` interleaved channels.
    ///
    /// # Panics
    ///
    /// Panics if `channels` is zero.
    pub fn new(data: &'a mut [f32], channels: usize) -> Self {
        assert!(channels > 0, "AudioBuffer needs at least one channel");
        Self { data, channels }
    }

    /// Wrap `data` as a single-channel buffer.
    pub fn mono(data: &'a mut [f32]) -> Self {
        Self::new(data, 1)
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Total number of samples across all channels.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of whole frames. A trailing partial frame is not counted.
    pub fn frames(&self) -> usize {
        self.data.len() / self.channels
    }

    /// The samples, read-only.
    pub fn samples(&self) -> &[f32] {
        &*self.data
    }

    /// The samples, writable.
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut *self.data
    }
}
