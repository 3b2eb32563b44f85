//! Decoded audio and its format description.

/// Interleaved `f32` samples plus the stream format.
#[derive(Clone, Debug, PartialEq)]
pub struct WavData {
    /// Interleaved samples in `[-1.0, 1.0]`.
    pub samples: Vec<f32>,
    /// Frames per second.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
}

impl WavData {
    /// Bundle samples with their format.
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// Number of whole frames.
    pub fn frames(&self) -> usize {
        match self.channels {
            0 => 0,
            ch => self.samples.len() / usize::from(ch),
        }
    }

    /// Playback length in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / f64::from(self.sample_rate)
    }
}

/// The subset of the `fmt ` chunk the codec cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatChunk {
    /// `wFormatTag`.
    pub format_tag: u16,
    /// `nChannels`.
    pub channels: u16,
    /// `nSamplesPerSec`.
    pub sample_rate: u32,
    /// `nAvgBytesPerSec`.
    pub byte_rate: u32,
    /// `nBlockAlign`.
    pub block_align: u16,
    /// `wBitsPerSample`.
    pub bits_per_sample: u16,
}

impl FormatChunk {
    /// The 16-bit PCM format for `channels` at `sample_rate`.
    pub fn pcm16(channels: u16, sample_rate: u32) -> Self {
        let block_align = channels.saturating_mul(2);
        Self {
            format_tag: crate::PCM_FORMAT,
            channels,
            sample_rate,
            byte_rate: sample_rate.saturating_mul(u32::from(block_align)),
            block_align,
            bits_per_sample: crate::BITS_PER_SAMPLE,
        }
    }
}
