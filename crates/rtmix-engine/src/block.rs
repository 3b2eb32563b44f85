//! Fixed-size sample blocks passed through the streaming ring.

/// Sample capacity of one [`Block`].
pub const BLOCK_SAMPLES: usize = 2048;

/// Slots in the streaming ring (one is always kept free).
pub const RING_SLOTS: usize = 8;

/// A frame-aligned run of interleaved output samples.
///
/// Blocks are plain `Copy` data with inline storage, so moving one through
/// the ring never touches the heap.
#[derive(Clone, Copy)]
pub struct Block {
    /// Index of the first frame in the session.
    pub first_frame: usize,
    len: usize,
    samples: [f32; BLOCK_SAMPLES],
}

impl Block {
    /// An empty block starting at frame 0.
    pub const fn new() -> Self {
        Self {
            first_frame: 0,
            len: 0,
            samples: [0.0; BLOCK_SAMPLES],
        }
    }

    /// The valid samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples[..self.len]
    }

    /// Resize to `len` valid samples and return them for writing.
    ///
    /// # Panics
    ///
    /// Panics if `len > BLOCK_SAMPLES`.
    pub fn fill_to(&mut self, len: usize) -> &mut [f32] {
        assert!(len <= BLOCK_SAMPLES, "block holds at most {BLOCK_SAMPLES} samples");
        self.len = len;
        &mut self.samples[..len]
    }

    /// Number of valid samples.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the block carries no samples.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Block")
            .field("first_frame", &self.first_frame)
            .field("len", &self.len)
            .finish()
    }
}

/// Frames per block for a `channels`-wide stream, given the configured
/// `block_frames`. Always at least 1.
pub fn frames_per_block(block_frames: usize, channels: usize) -> usize {
    let max = (BLOCK_SAMPLES / channels.max(1)).max(1);
    block_frames.clamp(1, max)
}
