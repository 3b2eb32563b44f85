//! Session-level error type.

use std::error::Error;
use std::fmt;

use rtmix_arena::ArenaError;
use rtmix_wav::WavError;

use crate::config::ConfigError;

/// Errors from building an engine or running a session.
#[derive(Debug)]
pub enum EngineError {
    /// Invalid [`EngineConfig`](crate::EngineConfig).
    Config(ConfigError),
    /// The session did not fit in the arena.
    Arena(ArenaError),
    /// Reading or writing a WAV file failed.
    Wav(WavError),
    /// The two inputs have different channel counts.
    ChannelMismatch {
        /// Channels in the first input.
        left: u16,
        /// Channels in the second input.
        right: u16,
    },
    /// The two inputs have different sample rates.
    SampleRateMismatch {
        /// Rate of the first input.
        left: u32,
        /// Rate of the second input.
        right: u32,
    },
    /// A single frame does not fit in one streaming block.
    TooManyChannels {
        /// Channels in the inputs.
        channels: u16,
        /// Samples one block can hold.
        max: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid config: {e}"),
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::Wav(e) => write!(f, "wav: {e}"),
            Self::ChannelMismatch { left, right } => {
                write!(f, "channel count mismatch: {left} vs {right}")
            }
            Self::SampleRateMismatch { left, right } => {
                write!(f, "sample rate mismatch: {left} Hz vs {right} Hz")
            }
            Self::TooManyChannels { channels, max } => {
                write!(f, "{channels} channels exceed the {max}-sample streaming block")
            }
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Arena(e) => Some(e),
            Self::Wav(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ArenaError> for EngineError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

impl From<WavError> for EngineError {
    fn from(e: WavError) -> Self {
        Self::Wav(e)
    }
}
