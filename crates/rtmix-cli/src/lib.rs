//! Argument parsing, logging setup and the mix command behind the `rtmix`
//! binary.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rtmix::arena::ArenaConfig;
use rtmix::engine::{AudioEngine, EngineConfig, ProcessingMode, SessionReport};
use rtmix::prelude::{ArenaError, EngineError};

pub use logging::{init_tracing, LogFormat};

/// Mix two WAV files with per-input gain.
#[derive(Debug, Parser)]
#[command(name = "rtmix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// First input (16-bit PCM WAV)
    pub input_a: PathBuf,

    /// Second input (16-bit PCM WAV)
    pub input_b: PathBuf,

    /// Output path (overwritten)
    pub output: PathBuf,

    /// Gain applied to the first input
    #[arg(long = "gain1", default_value_t = 0.8, allow_negative_numbers = true)]
    pub gain_a: f32,

    /// Gain applied to the second input
    #[arg(long = "gain2", default_value_t = 0.6, allow_negative_numbers = true)]
    pub gain_b: f32,

    /// Arena size in MiB
    #[arg(long, default_value_t = 10)]
    pub arena_mb: usize,

    /// Fade-in length in frames
    #[arg(long, default_value_t = 0)]
    pub fade_in: usize,

    /// Fade-out length in frames
    #[arg(long, default_value_t = 0)]
    pub fade_out: usize,

    /// Render through the lock-free ring on a producer/consumer thread pair
    #[arg(long)]
    pub streaming: bool,

    /// Frames per block in streaming mode
    #[arg(long, default_value_t = 256)]
    pub block_frames: usize,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format (default: pretty on a terminal, compact otherwise)
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Engine configuration described by the flags.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            arena: ArenaConfig::from_mebibytes(self.arena_mb),
            gain_a: self.gain_a,
            gain_b: self.gain_b,
            fade_in_frames: self.fade_in,
            fade_out_frames: self.fade_out,
            block_frames: self.block_frames,
        }
    }

    /// Processing mode selected by `--streaming`.
    pub fn mode(&self) -> ProcessingMode {
        if self.streaming {
            ProcessingMode::Streaming
        } else {
            ProcessingMode::Offline
        }
    }
}

/// Run the mix described by `cli`.
pub fn run(cli: &Cli) -> Result<SessionReport> {
    let mut engine = AudioEngine::new(cli.engine_config()).context("invalid engine settings")?;
    let report = engine
        .mix_files(&cli.input_a, &cli.input_b, &cli.output, cli.mode())
        .map_err(|e| explain(e, cli))?;
    Ok(report)
}

/// Attach a hint to errors the user can fix with a flag.
fn explain(err: EngineError, cli: &Cli) -> anyhow::Error {
    let hint = match &err {
        EngineError::Arena(ArenaError::CapacityExceeded { .. }) => {
            Some(format!("inputs do not fit in {} MiB; raise --arena-mb", cli.arena_mb))
        }
        EngineError::ChannelMismatch { .. } | EngineError::SampleRateMismatch { .. } => Some(
            format!(
                "{} and {} must share a format",
                cli.input_a.display(),
                cli.input_b.display()
            ),
        ),
        EngineError::TooManyChannels { .. } => {
            Some("too many channels to stream; drop --streaming".to_owned())
        }
        _ => None,
    };
    let err = anyhow::Error::new(err).context(format!(
        "failed to mix {} and {} into {}",
        cli.input_a.display(),
        cli.input_b.display(),
        cli.output.display()
    ));
    match hint {
        Some(hint) => err.context(hint),
        None => err,
    }
}

/// One-line human summary of a finished session.
pub fn summary(report: &SessionReport) -> String {
    let mut line = format!(
        "mixed {} frames ({} ch @ {} Hz, {}); arena used {} of {} bytes",
        report.frames,
        report.channels,
        report.sample_rate,
        report.mode,
        report.arena_used,
        report.arena_capacity
    );
    if let Some(stream) = &report.stream {
        line.push_str(&format!(
            "; {} blocks, {} producer stalls, {} consumer underruns",
            stream.blocks, stream.producer_stalls, stream.consumer_underruns
        ));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_engine_defaults() {
        let cli = Cli::try_parse_from(["rtmix", "a.wav", "b.wav", "out.wav"]).unwrap();
        assert_eq!(cli.engine_config(), EngineConfig::default());
        assert_eq!(cli.mode(), ProcessingMode::Offline);
        assert_eq!(cli.verbose, 0);
        assert!(cli.log_format.is_none());
    }

    #[test]
    fn flags_reach_the_config() {
        let cli = Cli::try_parse_from([
            "rtmix",
            "a.wav",
            "b.wav",
            "out.wav",
            "--gain1",
            "1.5",
            "--gain2",
            "-0.5",
            "--arena-mb",
            "2",
            "--fade-in",
            "100",
            "--fade-out",
            "200",
            "--streaming",
            "--block-frames",
            "64",
            "-vv",
            "--log-format",
            "json",
        ])
        .unwrap();
        let cfg = cli.engine_config();
        assert_eq!(cfg.gain_a, 1.5);
        assert_eq!(cfg.gain_b, -0.5);
        assert_eq!(cfg.arena.capacity_bytes, 2 * 1024 * 1024);
        assert_eq!(cfg.fade_in_frames, 100);
        assert_eq!(cfg.fade_out_frames, 200);
        assert_eq!(cfg.block_frames, 64);
        assert_eq!(cli.mode(), ProcessingMode::Streaming);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, Some(LogFormat::Json));
    }

    #[test]
    fn missing_output_is_a_usage_error() {
        assert!(Cli::try_parse_from(["rtmix", "a.wav", "b.wav"]).is_err());
    }
}
