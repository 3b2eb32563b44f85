//! Test utilities for rtmix development.
//!
//! - [`signals`]: deterministic sample generators (sine, ramp, seeded noise).
//! - [`wav`]: [`WavData`](rtmix_wav::WavData) builders and on-disk fixtures.
//! - [`DropCounter`]: a value that records how many times it was dropped,
//!   for checking that containers release what they hold.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod signals;
pub mod wav;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub use signals::{constant, noise, ramp, sine};
pub use wav::{stereo, WavFixture};

/// Increments a shared counter when dropped.
#[derive(Debug)]
pub struct DropCounter {
    drops: Arc<AtomicUsize>,
}

impl DropCounter {
    /// Create a counter handle sharing `drops`.
    pub fn new(drops: &Arc<AtomicUsize>) -> Self {
        Self {
            drops: Arc::clone(drops),
        }
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::Relaxed);
    }
}
