//! Arena-backed mixing engine for rtmix.
//!
//! [`AudioEngine`] mixes two inputs with per-input gain and optional
//! linear fades. All per-session sample storage comes from one
//! [`rtmix_arena::Arena`] that is reset between sessions.
//!
//! # Modes
//!
//! - [`ProcessingMode::Offline`] renders the session in one pass.
//! - [`ProcessingMode::Streaming`] renders fixed-size [`Block`]s on a
//!   producer thread and hands them to a consumer thread through an
//!   [`rtmix_ring::RingBuffer`], the way a real-time output callback
//!   would receive them. Backpressure is counted in [`StreamStats`].
//!
//! Both modes run the same [`MixStage`], so they produce identical output.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod config;
pub mod engine;
pub mod error;
pub mod stage;
pub mod streaming;

pub use block::{Block, BLOCK_SAMPLES, RING_SLOTS};
pub use config::{session_bytes, ConfigError, EngineConfig};
pub use engine::{AudioEngine, ProcessingMode, SessionReport};
pub use error::EngineError;
pub use stage::MixStage;
pub use streaming::StreamStats;
