//! Engine configuration, validation, and error types.

use std::error::Error;
use std::fmt;

use rtmix_arena::{ArenaConfig, ArenaError};

use crate::block::BLOCK_SAMPLES;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Arena configuration is invalid.
    Arena(ArenaError),
    /// A gain is NaN or infinite.
    InvalidGain {
        /// Which input the gain belongs to (`"gain_a"` or `"gain_b"`).
        which: &'static str,
        /// The invalid value.
        value: f32,
    },
    /// `block_frames` is zero or does not fit in one streaming block.
    InvalidBlockFrames {
        /// The configured value.
        configured: usize,
        /// Largest accepted value.
        max: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::InvalidGain { which, value } => {
                write!(f, "{which} must be finite, got {value}")
            }
            Self::InvalidBlockFrames { configured, max } => {
                write!(f, "block_frames must be in 1..={max}, got {configured}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for ConfigError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

// ── EngineConfig ───────────────────────────────────────────────────

/// Parameters for one [`AudioEngine`](crate::AudioEngine).
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Arena sizing. Default: 10 MiB.
    pub arena: ArenaConfig,
    /// Gain applied to the first input. Default: 0.8.
    pub gain_a: f32,
    /// Gain applied to the second input. Default: 0.6.
    pub gain_b: f32,
    /// Length of the fade-in at the start of the mix, in frames.
    /// Default: 0 (no fade).
    pub fade_in_frames: usize,
    /// Length of the fade-out at the end of the mix, in frames.
    /// Default: 0 (no fade).
    pub fade_out_frames: usize,
    /// Frames per block in streaming mode. Default: 256. Clamped per
    /// session so one block holds at most
    /// [`BLOCK_SAMPLES`](crate::block::BLOCK_SAMPLES) samples.
    pub block_frames: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            gain_a: 0.8,
            gain_b: 0.6,
            fade_in_frames: 0,
            fade_out_frames: 0,
            block_frames: 256,
        }
    }
}

impl EngineConfig {
    /// Check structural invariants. Called by
    /// [`AudioEngine::new`](crate::AudioEngine::new).
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arena.validate()?;
        for (which, value) in [("gain_a", self.gain_a), ("gain_b", self.gain_b)] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidGain { which, value });
            }
        }
        if self.block_frames == 0 || self.block_frames > BLOCK_SAMPLES {
            return Err(ConfigError::InvalidBlockFrames {
                configured: self.block_frames,
                max: BLOCK_SAMPLES,
            });
        }
        Ok(())
    }
}

/// Arena bytes one session needs for inputs of `samples` samples each:
/// two gain buffers and one output buffer, plus worst-case alignment slack.
pub fn session_bytes(samples: usize) -> usize {
    const BUFFERS: usize = 3;
    let per_buffer = samples.saturating_mul(std::mem::size_of::<f32>());
    per_buffer
        .saturating_add(std::mem::align_of::<f32>() - 1)
        .saturating_mul(BUFFERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.arena.capacity_bytes, 10 * 1024 * 1024);
        assert_eq!(cfg.gain_a, 0.8);
        assert_eq!(cfg.gain_b, 0.6);
        assert_eq!(cfg.block_frames, 256);
    }

    #[test]
    fn non_finite_gain_rejected() {
        let cfg = EngineConfig {
            gain_b: f32::INFINITY,
            ..EngineConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::InvalidGain { which: "gain_b", .. }) => {}
            other => panic!("expected InvalidGain(gain_b), got {other:?}"),
        }
    }

    #[test]
    fn zero_block_frames_rejected() {
        let cfg = EngineConfig {
            block_frames: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidBlockFrames { configured: 0, .. })
        ));
    }

    #[test]
    fn oversized_block_frames_rejected() {
        let cfg = EngineConfig {
            block_frames: BLOCK_SAMPLES + 1,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_arena_wrapped() {
        let cfg = EngineConfig {
            arena: ArenaConfig::new(0),
            ..EngineConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::Arena(ArenaError::InvalidConfig { .. })) => {}
            other => panic!("expected Arena(InvalidConfig), got {other:?}"),
        }
    }

    #[test]
    fn session_bytes_covers_three_buffers() {
        assert_eq!(session_bytes(0), 9);
        assert_eq!(session_bytes(100), 3 * (400 + 3));
        assert_eq!(session_bytes(usize::MAX), usize::MAX);
    }
}
