//! WAV builders and temporary on-disk fixtures.

use std::path::{Path, PathBuf};

use rtmix_wav::{write_wav, WavData, WavError};
use tempfile::TempDir;

/// Stereo data at `sample_rate` from interleaved `samples`.
pub fn stereo(samples: Vec<f32>, sample_rate: u32) -> WavData {
    WavData::new(samples, sample_rate, 2)
}

/// A temporary directory holding WAV files. Deleted on drop.
pub struct WavFixture {
    dir: TempDir,
}

impl WavFixture {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Path for `name` inside the fixture directory (not created).
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `data` as `name` and return its path.
    pub fn write(&self, name: &str, data: &WavData) -> Result<PathBuf, WavError> {
        let path = self.path(name);
        write_wav(&path, data)?;
        Ok(path)
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}
