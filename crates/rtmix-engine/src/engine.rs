//! The session driver.
//!
//! An [`AudioEngine`] owns one [`Arena`] for its whole life. Each session
//! resets the arena, carves three sample buffers out of it (one per input
//! and one for the mix), renders, and copies the result out. After the
//! first session no further heap traffic happens inside the arena's
//! budget; only the returned [`WavData`] is a fresh allocation.

use std::fmt;
use std::path::Path;

use rtmix_arena::Arena;
use rtmix_wav::{read_wav, write_wav, WavData};

use crate::block::{frames_per_block, BLOCK_SAMPLES};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::stage::MixStage;
use crate::streaming::{self, StreamStats};

/// How a session renders its output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProcessingMode {
    /// Render the whole session in one pass on the calling thread.
    #[default]
    Offline,
    /// Render block by block on a producer thread and drain the blocks
    /// through a lock-free ring on a consumer thread.
    Streaming,
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offline => f.write_str("offline"),
            Self::Streaming => f.write_str("streaming"),
        }
    }
}

/// Summary of one completed session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionReport {
    /// Zero-based session index on this engine.
    pub session: u64,
    /// Rendering mode used.
    pub mode: ProcessingMode,
    /// Output length in frames.
    pub frames: usize,
    /// Interleaved channel count.
    pub channels: u16,
    /// Sample rate shared by both inputs.
    pub sample_rate: u32,
    /// Arena bytes in use when the session finished.
    pub arena_used: usize,
    /// Arena capacity.
    pub arena_capacity: usize,
    /// Arena generation the session ran in.
    pub generation: u64,
    /// Ring counters, for streaming sessions.
    pub stream: Option<StreamStats>,
}

/// Mixes two inputs with per-input gain and optional fades.
pub struct AudioEngine {
    arena: Arena,
    config: EngineConfig,
    sessions: u64,
}

impl AudioEngine {
    /// Validate `config` and reserve the arena.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let arena = Arena::with_config(&config.arena)?;
        Ok(Self {
            arena,
            config,
            sessions: 0,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The backing arena, for inspection.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Sessions run so far.
    pub fn sessions(&self) -> u64 {
        self.sessions
    }

    /// Mix `a` and `b` in one pass.
    pub fn process(&mut self, a: &WavData, b: &WavData) -> Result<WavData, EngineError> {
        self.run(a, b, ProcessingMode::Offline).map(|(mix, _)| mix)
    }

    /// Mix `a` and `b` through the streaming ring.
    pub fn process_streaming(
        &mut self,
        a: &WavData,
        b: &WavData,
    ) -> Result<(WavData, StreamStats), EngineError> {
        let (mix, report) = self.run(a, b, ProcessingMode::Streaming)?;
        Ok((mix, report.stream.unwrap_or_default()))
    }

    /// Run one session.
    ///
    /// The output is as long as the longer input; the shorter one is
    /// padded with silence. Inputs must agree on channel count and sample
    /// rate.
    pub fn run(
        &mut self,
        a: &WavData,
        b: &WavData,
        mode: ProcessingMode,
    ) -> Result<(WavData, SessionReport), EngineError> {
        if a.channels != b.channels {
            return Err(EngineError::ChannelMismatch {
                left: a.channels,
                right: b.channels,
            });
        }
        if a.sample_rate != b.sample_rate {
            return Err(EngineError::SampleRateMismatch {
                left: a.sample_rate,
                right: b.sample_rate,
            });
        }
        if mode == ProcessingMode::Streaming && usize::from(a.channels) > BLOCK_SAMPLES {
            return Err(EngineError::TooManyChannels {
                channels: a.channels,
                max: BLOCK_SAMPLES,
            });
        }

        self.arena.reset();
        let session = self.sessions;

        let channels = usize::from(a.channels.max(1));
        let len = a.samples.len().max(b.samples.len());
        let frames = len.div_ceil(channels);
        tracing::info!(
            session,
            %mode,
            frames,
            channels,
            sample_rate = a.sample_rate,
            "session started"
        );

        let arena = &self.arena;
        let buf_a = arena.alloc_slice_fill(len, 0.0f32)?;
        buf_a[..a.samples.len()].copy_from_slice(&a.samples);
        let buf_b = arena.alloc_slice_fill(len, 0.0f32)?;
        buf_b[..b.samples.len()].copy_from_slice(&b.samples);
        let out = arena.alloc_slice_fill(len, 0.0f32)?;
        self.sessions += 1;

        let mut stage = MixStage::new(&self.config, channels, frames);
        let stream = match mode {
            ProcessingMode::Offline => {
                stage.render(buf_a, buf_b, out, 0);
                None
            }
            ProcessingMode::Streaming => {
                let fpb = frames_per_block(self.config.block_frames, channels);
                Some(streaming::run(stage, buf_a, buf_b, out, channels, fpb))
            }
        };

        let mix = WavData::new(out.to_vec(), a.sample_rate, a.channels);
        let report = SessionReport {
            session,
            mode,
            frames,
            channels: a.channels,
            sample_rate: a.sample_rate,
            arena_used: arena.used(),
            arena_capacity: arena.capacity(),
            generation: arena.generation(),
            stream,
        };
        tracing::info!(
            session,
            arena_used = report.arena_used,
            arena_capacity = report.arena_capacity,
            "session finished"
        );
        Ok((mix, report))
    }

    /// Load two WAV files, mix them, and write the result to `output`.
    pub fn mix_files(
        &mut self,
        input_a: impl AsRef<Path>,
        input_b: impl AsRef<Path>,
        output: impl AsRef<Path>,
        mode: ProcessingMode,
    ) -> Result<SessionReport, EngineError> {
        let a = read_wav(input_a)?;
        let b = read_wav(input_b)?;
        let (mix, report) = self.run(&a, &b, mode)?;
        write_wav(output, &mix)?;
        Ok(report)
    }
}

impl fmt::Debug for AudioEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioEngine")
            .field("config", &self.config)
            .field("sessions", &self.sessions)
            .field("arena", &self.arena)
            .finish()
    }
}
