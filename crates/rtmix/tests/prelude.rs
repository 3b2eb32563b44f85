//! The prelude is enough to run a whole session.

use rtmix::prelude::*;

#[test]
fn engine_session_through_the_facade() {
    let mut engine = AudioEngine::new(EngineConfig {
        gain_a: 0.5,
        gain_b: 0.5,
        ..EngineConfig::default()
    })
    .unwrap();

    let a = WavData::new(vec![0.5; 64], 8_000, 1);
    let b = WavData::new(vec![-0.5; 64], 8_000, 1);
    let (mix, report) = engine.run(&a, &b, ProcessingMode::Streaming).unwrap();
    assert!(mix.samples.iter().all(|&s| s == 0.0));
    assert_eq!(report.frames, 64);
}

#[test]
fn error_types_compose() {
    fn open() -> Result<WavData, EngineError> {
        Ok(read_wav("/definitely/not/here.wav")?)
    }
    assert!(matches!(open(), Err(EngineError::Wav(WavError::Io(_)))));
}
