//! WAV decoding.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::codec::{
    decode_format, read_chunk_header, read_fourcc, read_u32_le, sample_to_f32, skip_chunk,
    DATA_ID, FMT_ID, RIFF_ID, WAVE_ID,
};
use crate::error::WavError;
use crate::types::{FormatChunk, WavData};
use crate::{BITS_PER_SAMPLE, PCM_FORMAT};

/// Decode a 16-bit PCM WAV stream.
///
/// Chunks other than `fmt ` and `data` are skipped. Decoding stops at the
/// end of the `data` chunk; anything after it is not read.
pub fn decode<R: Read>(mut reader: R) -> Result<WavData, WavError> {
    let r: &mut dyn Read = &mut reader;

    if read_fourcc(r)? != RIFF_ID {
        return Err(WavError::InvalidRiff);
    }
    let _riff_size = read_u32_le(r)?;
    if read_fourcc(r)? != WAVE_ID {
        return Err(WavError::InvalidWave);
    }

    let mut format: Option<FormatChunk> = None;
    while let Some(chunk) = read_chunk_header(r)? {
        match chunk.id {
            FMT_ID => format = Some(validate_format(decode_format(r, chunk.size)?)?),
            DATA_ID => {
                let fmt = format.ok_or(WavError::MissingChunk { id: "fmt " })?;
                let samples = decode_samples(r, chunk.size)?;
                tracing::debug!(
                    sample_rate = fmt.sample_rate,
                    channels = fmt.channels,
                    samples = samples.len(),
                    "decoded wav"
                );
                return Ok(WavData::new(samples, fmt.sample_rate, fmt.channels));
            }
            _ => {
                tracing::trace!(id = %chunk.id_lossy(), size = chunk.size, "skipping chunk");
                skip_chunk(r, chunk.size)?;
            }
        }
    }

    Err(WavError::MissingChunk {
        id: if format.is_some() { "data" } else { "fmt " },
    })
}

/// Open and decode the WAV file at `path`.
pub fn read_wav(path: impl AsRef<Path>) -> Result<WavData, WavError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let data = decode(BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        frames = data.frames(),
        sample_rate = data.sample_rate,
        channels = data.channels,
        "loaded wav"
    );
    Ok(data)
}

fn validate_format(fmt: FormatChunk) -> Result<FormatChunk, WavError> {
    if fmt.format_tag != PCM_FORMAT {
        return Err(WavError::UnsupportedFormat {
            format_tag: fmt.format_tag,
        });
    }
    if fmt.bits_per_sample != BITS_PER_SAMPLE {
        return Err(WavError::UnsupportedBitDepth {
            bits: fmt.bits_per_sample,
        });
    }
    if fmt.channels == 0 {
        return Err(WavError::Malformed {
            detail: "fmt chunk declares zero channels".into(),
        });
    }
    Ok(fmt)
}

/// Read `size` bytes of sample data. A trailing odd byte is ignored.
fn decode_samples(r: &mut dyn Read, size: u32) -> Result<Vec<f32>, WavError> {
    let mut bytes = Vec::new();
    let got = r.take(u64::from(size)).read_to_end(&mut bytes)?;
    if got < size as usize {
        return Err(WavError::Malformed {
            detail: format!("data chunk truncated: declared {size} bytes, found {got}"),
        });
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| sample_to_f32(i16::from_le_bytes([pair[0], pair[1]])))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode_format, write_chunk_header};

    /// Assemble a WAV stream from raw chunks.
    fn riff(chunks: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
        let mut body = b"WAVE".to_vec();
        for (id, data) in chunks {
            write_chunk_header(&mut body, **id, data.len() as u32).unwrap();
            body.extend_from_slice(data);
            if data.len() % 2 == 1 {
                body.push(0);
            }
        }
        let mut out = b"RIFF".to_vec();
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
        out.extend_from_slice(&body);
        out
    }

    fn fmt_body(fmt: &FormatChunk) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_format(&mut buf, fmt).unwrap();
        buf.split_off(8)
    }

    fn pcm(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn decodes_canonical_stream() {
        let bytes = riff(&[
            (b"fmt ", fmt_body(&FormatChunk::pcm16(1, 8_000))),
            (b"data", pcm(&[0, 16384, -32768])),
        ]);
        let wav = decode(bytes.as_slice()).unwrap();
        assert_eq!(wav.sample_rate, 8_000);
        assert_eq!(wav.channels, 1);
        assert_eq!(wav.samples, vec![0.0, 0.5, -1.0]);
    }

    #[test]
    fn skips_auxiliary_chunks() {
        let bytes = riff(&[
            (b"LIST", b"odd".to_vec()),
            (b"fmt ", fmt_body(&FormatChunk::pcm16(2, 44_100))),
            (b"fact", vec![0; 4]),
            (b"data", pcm(&[1, 2, 3, 4])),
        ]);
        let wav = decode(bytes.as_slice()).unwrap();
        assert_eq!(wav.channels, 2);
        assert_eq!(wav.frames(), 2);
    }

    #[test]
    fn rejects_non_riff() {
        assert!(matches!(
            decode(&b"RIFX\0\0\0\0WAVE"[..]),
            Err(WavError::InvalidRiff)
        ));
    }

    #[test]
    fn rejects_non_wave_form() {
        assert!(matches!(
            decode(&b"RIFF\0\0\0\0AVI "[..]),
            Err(WavError::InvalidWave)
        ));
    }

    #[test]
    fn data_before_fmt_is_missing_fmt() {
        let bytes = riff(&[(b"data", pcm(&[1]))]);
        assert!(matches!(
            decode(bytes.as_slice()),
            Err(WavError::MissingChunk { id: "fmt " })
        ));
    }

    #[test]
    fn missing_data_chunk() {
        let bytes = riff(&[(b"fmt ", fmt_body(&FormatChunk::pcm16(1, 8_000)))]);
        assert!(matches!(
            decode(bytes.as_slice()),
            Err(WavError::MissingChunk { id: "data" })
        ));
    }

    #[test]
    fn rejects_float_and_24_bit() {
        let mut float = FormatChunk::pcm16(1, 8_000);
        float.format_tag = 3;
        let bytes = riff(&[(b"fmt ", fmt_body(&float)), (b"data", vec![])]);
        assert!(matches!(
            decode(bytes.as_slice()),
            Err(WavError::UnsupportedFormat { format_tag: 3 })
        ));

        let mut wide = FormatChunk::pcm16(1, 8_000);
        wide.bits_per_sample = 24;
        let bytes = riff(&[(b"fmt ", fmt_body(&wide)), (b"data", vec![])]);
        assert!(matches!(
            decode(bytes.as_slice()),
            Err(WavError::UnsupportedBitDepth { bits: 24 })
        ));
    }

    #[test]
    fn truncated_data_is_malformed() {
        let mut bytes = riff(&[
            (b"fmt ", fmt_body(&FormatChunk::pcm16(1, 8_000))),
            (b"data", pcm(&[1, 2, 3, 4])),
        ]);
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(
            decode(bytes.as_slice()),
            Err(WavError::Malformed { .. })
        ));
    }
}
