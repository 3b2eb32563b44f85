//! The per-session processing chain shared by offline and streaming modes.
//!
//! ```text
//! input A ── GainNode(gain_a) ─┐
//!                              ├─ MixerNode ── FadeNode(in) ── FadeNode(out, tail only) ── out
//! input B ── GainNode(gain_b) ─┘
//! ```
//!
//! Rendering is frame-addressed: the stage is fed consecutive runs of
//! frames and keeps fade state between calls, so rendering a session in one
//! call or in many blocks yields identical samples.

use rtmix_dsp::{AudioBuffer, AudioNode, FadeNode, GainNode, MixerNode};

use crate::config::EngineConfig;

/// Gain, mix and fade state for one session.
#[derive(Clone, Debug)]
pub struct MixStage {
    gain_a: GainNode,
    gain_b: GainNode,
    fade_in: FadeNode,
    fade_out: FadeNode,
    /// First frame the fade-out touches.
    fade_out_start: usize,
    channels: usize,
}

impl MixStage {
    /// Build the chain for a session of `total_frames` frames with
    /// `channels` interleaved channels.
    pub fn new(config: &EngineConfig, channels: usize, total_frames: usize) -> Self {
        let fade_out_frames = config.fade_out_frames.min(total_frames);
        Self {
            gain_a: GainNode::new(config.gain_a),
            gain_b: GainNode::new(config.gain_b),
            fade_in: FadeNode::fade_in(config.fade_in_frames),
            fade_out: FadeNode::fade_out(fade_out_frames),
            fade_out_start: total_frames - fade_out_frames,
            channels: channels.max(1),
        }
    }

    /// Render one run of frames starting at session frame `first_frame`.
    ///
    /// `a` and `b` are scaled in place, summed into `out`, and `out` is
    /// faded. Runs must be fed in order without gaps.
    pub fn render(&mut self, a: &mut [f32], b: &mut [f32], out: &mut [f32], first_frame: usize) {
        let ch = self.channels;
        self.gain_a.process(&mut AudioBuffer::new(a, ch));
        self.gain_b.process(&mut AudioBuffer::new(b, ch));
        MixerNode::mix_slices(a, b, out);

        if !self.fade_in.is_finished() {
            self.fade_in.process(&mut AudioBuffer::new(out, ch));
        }

        let tail = self
            .fade_out_start
            .saturating_sub(first_frame)
            .saturating_mul(ch)
            .min(out.len());
        if tail < out.len() {
            self.fade_out.process(&mut AudioBuffer::new(&mut out[tail..], ch));
        }
    }
}
