//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for an [`Arena`](crate::Arena).
///
/// The byte budget is fixed for the arena's lifetime. Validated by
/// [`Arena::with_config`](crate::Arena::with_config).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the backing region in bytes.
    ///
    /// Default: 10 MiB, enough for a few minutes of stereo f32 audio per
    /// session. Must be non-zero and no larger than `isize::MAX`.
    pub capacity_bytes: usize,
}

impl ArenaConfig {
    /// Default byte budget: 10 MiB.
    pub const DEFAULT_CAPACITY_BYTES: usize = 10 * 1024 * 1024;

    /// Create a config with the given byte budget.
    pub fn new(capacity_bytes: usize) -> Self {
        Self { capacity_bytes }
    }

    /// Create a config with a budget of `mebibytes * 1024 * 1024` bytes,
    /// saturating at `usize::MAX` (which `validate` then rejects).
    pub fn from_mebibytes(mebibytes: usize) -> Self {
        Self::new(mebibytes.saturating_mul(1024 * 1024))
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.capacity_bytes == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "capacity_bytes must be at least 1".to_string(),
            });
        }
        if self.capacity_bytes > isize::MAX as usize {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "capacity_bytes {} exceeds isize::MAX",
                    self.capacity_bytes
                ),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY_BYTES)
    }
}
