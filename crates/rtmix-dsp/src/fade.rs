//! Linear fades.
//!
//! A fade keeps a frame counter that advances across `process` calls, so a
//! signal split into blocks fades exactly as it would in one pass. For a
//! fade of `d` frames at position `p`:
//!
//! - fade-in scales by `min(p / d, 1)`,
//! - fade-out scales by `max(1 - p / d, 0)`.
//!
//! Every sample of a frame gets the same factor. A zero-length fade is
//! disabled and leaves the signal untouched.

use crate::{AudioBuffer, AudioNode, LANES};

/// Which way a [`FadeNode`] ramps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeDirection {
    /// Ramp from silence to full level.
    In,
    /// Ramp from full level to silence, then stay silent.
    Out,
}

/// A stateful linear fade.
#[derive(Clone, Debug, PartialEq)]
pub struct FadeNode {
    direction: FadeDirection,
    duration: usize,
    position: usize,
}

impl FadeNode {
    /// Create a fade of `duration_frames` frames in the given direction.
    pub fn new(duration_frames: usize, direction: FadeDirection) -> Self {
        Self {
            direction,
            duration: duration_frames,
            position: 0,
        }
    }

    /// Shorthand for `FadeNode::new(duration_frames, FadeDirection::In)`.
    pub fn fade_in(duration_frames: usize) -> Self {
        Self::new(duration_frames, FadeDirection::In)
    }

    /// Shorthand for `FadeNode::new(duration_frames, FadeDirection::Out)`.
    pub fn fade_out(duration_frames: usize) -> Self {
        Self::new(duration_frames, FadeDirection::Out)
    }

    /// Fade direction.
    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    /// Fade length in frames.
    pub fn duration(&self) -> usize {
        self.duration
    }

    /// Frames processed since construction or the last reset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the ramp has completed. Further frames get a constant
    /// factor (1 for fade-in, 0 for fade-out).
    pub fn is_finished(&self) -> bool {
        self.position >= self.duration
    }

    /// Scale factor the frame at `position` receives.
    pub fn factor_at(&self, position: usize) -> f32 {
        if self.duration == 0 {
            return 1.0;
        }
        let ratio = position as f32 / self.duration as f32;
        match self.direction {
            FadeDirection::In => ratio.min(1.0),
            FadeDirection::Out => (1.0 - ratio).max(0.0),
        }
    }

    /// Fade `samples`, interpreted as `channels` interleaved channels.
    pub fn apply(&mut self, samples: &mut [f32], channels: usize) {
        if self.duration == 0 || channels == 0 {
            return;
        }
        if channels == 1 {
            self.apply_mono(samples);
            return;
        }
        for frame in samples.chunks_mut(channels) {
            let factor = self.factor_at(self.position);
            for s in frame {
                *s *= factor;
            }
            self.position = self.position.saturating_add(1);
        }
    }

    fn apply_mono(&mut self, samples: &mut [f32]) {
        let mut chunks = samples.chunks_exact_mut(LANES);
        for chunk in &mut chunks {
            for s in chunk {
                *s *= self.factor_at(self.position);
                self.position = self.position.saturating_add(1);
            }
        }
        for s in chunks.into_remainder() {
            *s *= self.factor_at(self.position);
            self.position = self.position.saturating_add(1);
        }
    }
}

impl AudioNode for FadeNode {
    fn process(&mut self, buffer: &mut AudioBuffer<'_>) {
        let channels = buffer.channels();
        self.apply(buffer.samples_mut(), channels);
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(node: &mut FadeNode, data: &mut [f32], channels: usize) {
        node.process(&mut AudioBuffer::new(data, channels));
    }

    #[test]
    fn fade_out_over_four_frames() {
        let mut data = [1.0f32; 5];
        run(&mut FadeNode::fade_out(4), &mut data, 1);
        assert_eq!(data, [1.0, 0.75, 0.5, 0.25, 0.0]);
    }

    #[test]
    fn fade_in_over_four_frames_then_unity() {
        let mut data = [1.0f32; 6];
        run(&mut FadeNode::fade_in(4), &mut data, 1);
        assert_eq!(data, [0.0, 0.25, 0.5, 0.75, 1.0, 1.0]);
    }

    #[test]
    fn fade_out_stays_silent_after_completion() {
        let mut node = FadeNode::fade_out(2);
        let mut data = [1.0f32; 12];
        run(&mut node, &mut data, 1);
        assert!(node.is_finished());
        assert!(data[2..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn counter_carries_across_calls() {
        let mut whole = [1.0f32; 20];
        run(&mut FadeNode::fade_in(16), &mut whole, 1);

        let mut node = FadeNode::fade_in(16);
        let mut split = [1.0f32; 20];
        let (a, b) = split.split_at_mut(7);
        run(&mut node, a, 1);
        run(&mut node, b, 1);
        assert_eq!(whole, split);
        assert_eq!(node.position(), 20);
    }

    #[test]
    fn stereo_frames_share_a_factor() {
        let mut data = [1.0f32; 6];
        run(&mut FadeNode::fade_in(2), &mut data, 2);
        assert_eq!(data, [0.0, 0.0, 0.5, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn reset_restarts_the_ramp() {
        let mut node = FadeNode::fade_in(4);
        let mut data = [1.0f32; 4];
        run(&mut node, &mut data, 1);
        node.reset();
        assert_eq!(node.position(), 0);

        let mut again = [1.0f32; 4];
        run(&mut node, &mut again, 1);
        assert_eq!(data, again);
    }

    #[test]
    fn zero_duration_is_pass_through() {
        for direction in [FadeDirection::In, FadeDirection::Out] {
            let mut data = [0.5f32; 3];
            run(&mut FadeNode::new(0, direction), &mut data, 1);
            assert_eq!(data, [0.5; 3]);
        }
    }
}
