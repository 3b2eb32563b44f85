//! Encode/decode through files and in-memory buffers.

use proptest::prelude::*;
use rtmix_wav::{decode, encode, read_wav, write_wav, WavData, WavError, HEADER_LEN};

/// Truncation loses up to one step, and the 32767 vs 32768 scale mismatch
/// adds up to one more near full scale.
const TOLERANCE: f32 = 3.0 / 32768.0;

#[test]
fn file_round_trip_keeps_format_and_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sine.wav");

    let samples: Vec<f32> = (0..2 * 441)
        .map(|i| ((i / 2) as f32 * 0.05).sin() * 0.9)
        .collect();
    let original = WavData::new(samples, 44_100, 2);
    write_wav(&path, &original).unwrap();

    let len = std::fs::metadata(&path).unwrap().len() as usize;
    assert_eq!(len, HEADER_LEN + original.samples.len() * 2);

    let back = read_wav(&path).unwrap();
    assert_eq!(back.sample_rate, 44_100);
    assert_eq!(back.channels, 2);
    assert_eq!(back.samples.len(), original.samples.len());
    for (a, b) in original.samples.iter().zip(&back.samples) {
        assert!((a - b).abs() <= TOLERANCE, "{a} vs {b}");
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_wav(dir.path().join("nope.wav")).unwrap_err();
    assert!(matches!(err, WavError::Io(_)));
}

#[test]
fn empty_signal_round_trips() {
    let mut buf = Vec::new();
    encode(&mut buf, &WavData::new(Vec::new(), 22_050, 1)).unwrap();
    assert_eq!(buf.len(), HEADER_LEN);
    let back = decode(buf.as_slice()).unwrap();
    assert!(back.samples.is_empty());
    assert_eq!(back.sample_rate, 22_050);
}

proptest! {
    #[test]
    fn in_range_samples_survive_within_quantisation_error(
        samples in prop::collection::vec(-1.0f32..=1.0, 0..512),
        channels in 1u16..8,
        sample_rate in 1u32..192_000,
    ) {
        let original = WavData::new(samples, sample_rate, channels);
        let mut buf = Vec::new();
        encode(&mut buf, &original).unwrap();
        let back = decode(buf.as_slice()).unwrap();

        prop_assert_eq!(back.sample_rate, sample_rate);
        prop_assert_eq!(back.channels, channels);
        prop_assert_eq!(back.samples.len(), original.samples.len());
        for (a, b) in original.samples.iter().zip(&back.samples) {
            prop_assert!((a - b).abs() <= TOLERANCE, "{} vs {}", a, b);
        }
    }
}
