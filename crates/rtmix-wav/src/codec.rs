//! Little-endian primitives, sample conversion and chunk framing.

use std::io::{self, Read, Write};

use crate::error::WavError;
use crate::types::FormatChunk;

/// RIFF container id.
pub const RIFF_ID: [u8; 4] = *b"RIFF";
/// RIFF form type for audio.
pub const WAVE_ID: [u8; 4] = *b"WAVE";
/// Format chunk id.
pub const FMT_ID: [u8; 4] = *b"fmt ";
/// Sample data chunk id.
pub const DATA_ID: [u8; 4] = *b"data";

/// Size of the `fmt ` body for plain PCM.
pub const PCM_FMT_LEN: u32 = 16;

// ── Primitive writers ───────────────────────────────────────────

/// Write a little-endian u16.
pub fn write_u16_le(w: &mut dyn Write, v: u16) -> Result<(), WavError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), WavError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a little-endian u16.
pub fn read_u16_le(r: &mut dyn Read) -> Result<u16, WavError> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, WavError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a four-character code.
pub fn read_fourcc(r: &mut dyn Read) -> Result<[u8; 4], WavError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

// ── Sample conversion ───────────────────────────────────────────

/// Convert a stored sample to `f32`.
pub fn sample_to_f32(v: i16) -> f32 {
    f32::from(v) / 32768.0
}

/// Convert an `f32` sample for storage. Out-of-range input is clamped;
/// the scaled value is truncated toward zero. NaN encodes as 0.
pub fn f32_to_sample(v: f32) -> i16 {
    (v.clamp(-1.0, 1.0) * 32767.0) as i16
}

// ── Chunk framing ───────────────────────────────────────────────

/// A chunk id and its declared body length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Four-character chunk id.
    pub id: [u8; 4],
    /// Body length in bytes, excluding the pad byte of odd-sized chunks.
    pub size: u32,
}

impl ChunkHeader {
    /// The id as text, for logs and errors.
    pub fn id_lossy(&self) -> String {
        String::from_utf8_lossy(&self.id).into_owned()
    }
}

/// Read the next chunk header, or `None` at a clean end of stream.
///
/// A stream that ends partway through a header is an I/O error.
pub fn read_chunk_header(r: &mut dyn Read) -> Result<Option<ChunkHeader>, WavError> {
    let mut id = [0u8; 4];
    let mut filled = 0;
    while filled < id.len() {
        match r.read(&mut id[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into()),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    let size = read_u32_le(r)?;
    Ok(Some(ChunkHeader { id, size }))
}

/// Discard a chunk body of `size` bytes plus its pad byte if `size` is odd.
pub fn skip_chunk(r: &mut dyn Read, size: u32) -> Result<(), WavError> {
    let padded = u64::from(size) + u64::from(size & 1);
    let skipped = io::copy(&mut (&mut *r).take(padded), &mut io::sink())?;
    if skipped < u64::from(size) {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(())
}

/// Write a chunk header.
pub fn write_chunk_header(w: &mut dyn Write, id: [u8; 4], size: u32) -> Result<(), WavError> {
    w.write_all(&id)?;
    write_u32_le(w, size)
}

// ── fmt chunk ───────────────────────────────────────────────────

/// Decode a `fmt ` body of `size` bytes. Extension bytes past the first 16
/// are skipped.
pub fn decode_format(r: &mut dyn Read, size: u32) -> Result<FormatChunk, WavError> {
    if size < PCM_FMT_LEN {
        return Err(WavError::Malformed {
            detail: format!("fmt chunk is {size} bytes, need at least {PCM_FMT_LEN}"),
        });
    }
    let fmt = FormatChunk {
        format_tag: read_u16_le(r)?,
        channels: read_u16_le(r)?,
        sample_rate: read_u32_le(r)?,
        byte_rate: read_u32_le(r)?,
        block_align: read_u16_le(r)?,
        bits_per_sample: read_u16_le(r)?,
    };
    // The remainder has the same parity as `size`, so this also eats the pad.
    skip_chunk(r, size - PCM_FMT_LEN)?;
    Ok(fmt)
}

/// Encode a plain 16-byte PCM `fmt ` chunk, header included.
pub fn encode_format(w: &mut dyn Write, fmt: &FormatChunk) -> Result<(), WavError> {
    write_chunk_header(w, FMT_ID, PCM_FMT_LEN)?;
    write_u16_le(w, fmt.format_tag)?;
    write_u16_le(w, fmt.channels)?;
    write_u32_le(w, fmt.sample_rate)?;
    write_u32_le(w, fmt.byte_rate)?;
    write_u16_le(w, fmt.block_align)?;
    write_u16_le(w, fmt.bits_per_sample)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_conversion_endpoints() {
        assert_eq!(sample_to_f32(i16::MIN), -1.0);
        assert_eq!(sample_to_f32(0), 0.0);
        assert_eq!(f32_to_sample(1.0), 32767);
        assert_eq!(f32_to_sample(-1.0), -32767);
        assert_eq!(f32_to_sample(4.0), 32767);
        assert_eq!(f32_to_sample(-4.0), -32767);
        assert_eq!(f32_to_sample(f32::NAN), 0);
    }

    #[test]
    fn encode_truncates_toward_zero() {
        // 0.5 * 32767 = 16383.5
        assert_eq!(f32_to_sample(0.5), 16383);
        assert_eq!(f32_to_sample(-0.5), -16383);
    }

    #[test]
    fn chunk_header_clean_eof_is_none() {
        let mut empty: &[u8] = &[];
        assert!(read_chunk_header(&mut empty).unwrap().is_none());
    }

    #[test]
    fn chunk_header_partial_id_is_an_error() {
        let mut partial: &[u8] = b"da";
        assert!(matches!(read_chunk_header(&mut partial), Err(WavError::Io(_))));
    }

    #[test]
    fn skip_consumes_pad_byte() {
        let bytes = [1u8, 2, 3, 0, b'n', b'e', b'x', b't'];
        let mut r: &[u8] = &bytes;
        skip_chunk(&mut r, 3).unwrap();
        assert_eq!(read_fourcc(&mut r).unwrap(), *b"next");
    }

    #[test]
    fn format_round_trip_with_extension_bytes() {
        let fmt = FormatChunk::pcm16(2, 44_100);
        let mut buf = Vec::new();
        encode_format(&mut buf, &fmt).unwrap();
        // Append a cbSize extension and patch the declared size to 18.
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf[4..8].copy_from_slice(&18u32.to_le_bytes());
        buf.extend_from_slice(b"tail");

        let mut r: &[u8] = &buf;
        let header = read_chunk_header(&mut r).unwrap().unwrap();
        assert_eq!(header.id, FMT_ID);
        assert_eq!(decode_format(&mut r, header.size).unwrap(), fmt);
        assert_eq!(read_fourcc(&mut r).unwrap(), *b"tail");
    }

    #[test]
    fn short_format_chunk_is_malformed() {
        let mut r: &[u8] = &[0u8; 8];
        assert!(matches!(
            decode_format(&mut r, 8),
            Err(WavError::Malformed { .. })
        ));
    }
}
