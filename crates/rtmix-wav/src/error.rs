//! Error types for WAV decoding and encoding.

use std::fmt;
use std::io;

/// Errors that can occur while reading or writing a WAV stream.
#[derive(Debug)]
pub enum WavError {
    /// An I/O error occurred, including a stream that ended mid-chunk.
    Io(io::Error),
    /// The stream does not start with `b"RIFF"`.
    InvalidRiff,
    /// The RIFF form type is not `b"WAVE"`.
    InvalidWave,
    /// A required chunk was not found before the end of the stream.
    MissingChunk {
        /// The four-character chunk id, e.g. `"fmt "`.
        id: &'static str,
    },
    /// The format tag is not integer PCM.
    UnsupportedFormat {
        /// The `wFormatTag` found in the file.
        format_tag: u16,
    },
    /// The sample width is not 16 bits.
    UnsupportedBitDepth {
        /// The `wBitsPerSample` found in the file.
        bits: u16,
    },
    /// The stream is structurally valid RIFF but its contents are
    /// inconsistent, or the data cannot be represented in a WAV file.
    Malformed {
        /// Human-readable description of what went wrong.
        detail: String,
    },
}

impl fmt::Display for WavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidRiff => write!(f, "not a RIFF file (expected b\"RIFF\")"),
            Self::InvalidWave => write!(f, "RIFF form type is not b\"WAVE\""),
            Self::MissingChunk { id } => write!(f, "missing {id:?} chunk"),
            Self::UnsupportedFormat { format_tag } => {
                write!(f, "unsupported format tag {format_tag:#06x} (only PCM is supported)")
            }
            Self::UnsupportedBitDepth { bits } => {
                write!(f, "unsupported bit depth {bits} (only 16-bit is supported)")
            }
            Self::Malformed { detail } => write!(f, "malformed WAV: {detail}"),
        }
    }
}

impl std::error::Error for WavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for WavError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn io_errors_keep_their_source() {
        let err = WavError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("eof"));
    }

    #[test]
    fn display_names_the_offending_value() {
        assert!(WavError::UnsupportedBitDepth { bits: 24 }
            .to_string()
            .contains("24"));
        assert!(WavError::MissingChunk { id: "data" }
            .to_string()
            .contains("\"data\""));
    }
}
