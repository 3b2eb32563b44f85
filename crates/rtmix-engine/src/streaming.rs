//! Streaming mode: a producer renders blocks into an SPSC ring and a
//! consumer drains them into the output buffer.
//!
//! ```text
//! producer thread                       consumer thread
//! ───────────────                       ───────────────
//! MixStage::render ──► Block ──push──► RingBuffer<Block, RING_SLOTS> ──pop──► out[..]
//!      (yield on full, count stall)          (yield on empty, count underrun)
//! ```
//!
//! Both threads are scoped to the session, so they borrow the arena
//! buffers directly. Neither side blocks: a full or empty ring is
//! transient backpressure and the thread yields before retrying.

use std::panic;
use std::thread;

use rtmix_ring::RingBuffer;

use crate::block::{Block, RING_SLOTS};
use crate::stage::MixStage;

/// Counters from one streaming session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Blocks passed through the ring.
    pub blocks: usize,
    /// Frames per block used for this session.
    pub frames_per_block: usize,
    /// Times the producer found the ring full.
    pub producer_stalls: usize,
    /// Times the consumer found the ring empty.
    pub consumer_underruns: usize,
}

/// Render `a` + `b` into `out` through the ring, `frames_per_block` frames
/// at a time.
///
/// `a`, `b` and `out` must have equal length. A panic on either thread is
/// propagated to the caller.
pub(crate) fn run(
    mut stage: MixStage,
    a: &mut [f32],
    b: &mut [f32],
    out: &mut [f32],
    channels: usize,
    frames_per_block: usize,
) -> StreamStats {
    debug_assert_eq!(a.len(), out.len());
    debug_assert_eq!(b.len(), out.len());

    let block_samples = frames_per_block * channels;
    let total = out.len();
    let (mut tx, mut rx) = RingBuffer::<Block, RING_SLOTS>::new().split();

    let (blocks, producer_stalls, consumer_underruns) = thread::scope(|s| {
        let producer = s.spawn(move || {
            let mut block = Block::new();
            let mut blocks = 0usize;
            let mut stalls = 0usize;
            let runs = a.chunks_mut(block_samples).zip(b.chunks_mut(block_samples));
            for (i, (ca, cb)) in runs.enumerate() {
                let first_frame = i * frames_per_block;
                block.first_frame = first_frame;
                let len = ca.len();
                stage.render(ca, cb, block.fill_to(len), first_frame);

                let mut pending = block;
                while let Err(back) = tx.push(pending) {
                    if tx.is_abandoned() {
                        return (blocks, stalls);
                    }
                    pending = back;
                    stalls += 1;
                    thread::yield_now();
                }
                blocks += 1;
            }
            (blocks, stalls)
        });

        let consumer = s.spawn(move || {
            let mut written = 0usize;
            let mut underruns = 0usize;
            while written < total {
                let block = match rx.pop() {
                    Some(block) => block,
                    None if rx.is_abandoned() => match rx.pop() {
                        Some(block) => block,
                        // Producer exited early; it panicked or was starved.
                        None => break,
                    },
                    None => {
                        underruns += 1;
                        thread::yield_now();
                        continue;
                    }
                };
                let src = block.samples();
                out[written..written + src.len()].copy_from_slice(src);
                written += src.len();
            }
            underruns
        });

        let (blocks, stalls) = producer.join().unwrap_or_else(|e| panic::resume_unwind(e));
        let underruns = consumer.join().unwrap_or_else(|e| panic::resume_unwind(e));
        (blocks, stalls, underruns)
    });

    let stats = StreamStats {
        blocks,
        frames_per_block,
        producer_stalls,
        consumer_underruns,
    };
    tracing::debug!(
        blocks = stats.blocks,
        frames_per_block = stats.frames_per_block,
        producer_stalls = stats.producer_stalls,
        consumer_underruns = stats.consumer_underruns,
        "stream drained"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineConfig;

    #[test]
    fn stream_matches_offline_render() {
        let cfg = EngineConfig {
            fade_in_frames: 10,
            fade_out_frames: 20,
            ..EngineConfig::default()
        };
        let frames = 1000;
        let signal_a: Vec<f32> = (0..frames * 2).map(|i| (i as f32 * 0.01).sin()).collect();
        let signal_b: Vec<f32> = (0..frames * 2).map(|i| (i as f32 * 0.03).cos()).collect();

        let mut offline = vec![0.0f32; frames * 2];
        MixStage::new(&cfg, 2, frames).render(
            &mut signal_a.clone(),
            &mut signal_b.clone(),
            &mut offline,
            0,
        );

        let mut streamed = vec![0.0f32; frames * 2];
        let stats = run(
            MixStage::new(&cfg, 2, frames),
            &mut signal_a.clone(),
            &mut signal_b.clone(),
            &mut streamed,
            2,
            64,
        );

        assert_eq!(offline, streamed);
        assert_eq!(stats.blocks, frames.div_ceil(64));
        assert_eq!(stats.frames_per_block, 64);
    }

    #[test]
    fn empty_session_streams_nothing() {
        let cfg = EngineConfig::default();
        let stats = run(MixStage::new(&cfg, 1, 0), &mut [], &mut [], &mut [], 1, 256);
        assert_eq!(stats.blocks, 0);
    }
}
