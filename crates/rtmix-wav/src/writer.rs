//! WAV encoding.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::codec::{
    encode_format, f32_to_sample, write_chunk_header, write_u32_le, DATA_ID, RIFF_ID, WAVE_ID,
};
use crate::error::WavError;
use crate::types::{FormatChunk, WavData};
use crate::HEADER_LEN;

/// Encode `data` as a canonical 16-bit PCM WAV stream.
///
/// Fails with [`WavError::Malformed`] if `data` has zero channels or more
/// samples than a RIFF size field can describe.
pub fn encode<W: Write>(mut writer: W, data: &WavData) -> Result<(), WavError> {
    let w: &mut dyn Write = &mut writer;

    if data.channels == 0 {
        return Err(WavError::Malformed {
            detail: "cannot encode zero channels".into(),
        });
    }
    let data_len = data
        .samples
        .len()
        .checked_mul(2)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| n.checked_add(HEADER_LEN as u32 - 8).is_some())
        .ok_or_else(|| WavError::Malformed {
            detail: format!("{} samples exceed the 4 GiB RIFF limit", data.samples.len()),
        })?;

    w.write_all(&RIFF_ID)?;
    write_u32_le(w, HEADER_LEN as u32 - 8 + data_len)?;
    w.write_all(&WAVE_ID)?;
    encode_format(w, &FormatChunk::pcm16(data.channels, data.sample_rate))?;
    write_chunk_header(w, DATA_ID, data_len)?;

    let mut block = [0u8; 512];
    for chunk in data.samples.chunks(block.len() / 2) {
        for (dst, &s) in block.chunks_exact_mut(2).zip(chunk) {
            dst.copy_from_slice(&f32_to_sample(s).to_le_bytes());
        }
        w.write_all(&block[..chunk.len() * 2])?;
    }
    w.flush()?;
    Ok(())
}

/// Encode `data` into a new file at `path`, replacing any existing file.
pub fn write_wav(path: impl AsRef<Path>, data: &WavData) -> Result<(), WavError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    encode(BufWriter::new(file), data)?;
    tracing::info!(
        path = %path.display(),
        frames = data.frames(),
        sample_rate = data.sample_rate,
        channels = data.channels,
        "wrote wav"
    );
    Ok(())
}
