// Integration tests for the public extraction API
//
// These tests run complete extractions on synthetic signals and check the
// documented behavior of every feature.

use audio_features::analysis::features::TempoEstimator;
use audio_features::fixtures::{SyntheticPattern, SyntheticSpec};
use audio_features::{extract_features, ErrorCode, FeatureRecord, InvalidInputError, Waveform};

const SAMPLE_RATE: u32 = 44100;

fn render(pattern: SyntheticPattern, seconds: f64) -> Vec<f32> {
    SyntheticSpec::new(pattern).render(SAMPLE_RATE, seconds).samples
}

#[test]
fn test_one_second_of_silence() {
    let features = extract_features(&vec![0.0; 44100], SAMPLE_RATE).unwrap();
    assert_eq!(
        features,
        FeatureRecord {
            duration_seconds: 1.0,
            rms_energy: 0.0,
            zero_crossing_rate: 0.0,
            spectral_centroid_hz: 0.0,
            spectral_rolloff_hz: 0.0,
            tempo_bpm: 0.0,
        }
    );
}

#[test]
fn test_silence_of_any_length() {
    for &len in &[1usize, 100, 2047, 2048, 5000, 100_000] {
        let features = extract_features(&vec![0.0; len], SAMPLE_RATE).unwrap();
        assert_eq!(features.rms_energy, 0.0, "len {}", len);
        assert_eq!(features.zero_crossing_rate, 0.0, "len {}", len);
        assert_eq!(features.spectral_centroid_hz, 0.0, "len {}", len);
        assert_eq!(features.spectral_rolloff_hz, 0.0, "len {}", len);
        assert_eq!(features.tempo_bpm, 0.0, "len {}", len);
    }
}

#[test]
fn test_440_hz_sine() {
    let signal = render(SyntheticPattern::Sine, 2.0);
    let features = extract_features(&signal, SAMPLE_RATE).unwrap();

    assert!(
        (features.spectral_centroid_hz - 440.0).abs() < 22.0,
        "centroid {} Hz",
        features.spectral_centroid_hz
    );
    assert!(
        (features.rms_energy - 0.707).abs() < 0.01,
        "rms {}",
        features.rms_energy
    );
    assert!((features.duration_seconds - 2.0).abs() < 1e-12);
    // a 440 Hz sine crosses zero 880 times per second
    assert!(
        (features.zero_crossing_rate - 880.0 / 44100.0).abs() < 1e-3,
        "zcr {}",
        features.zero_crossing_rate
    );
}

#[test]
fn test_sine_rms_scales_with_amplitude() {
    let mut spec = SyntheticSpec::new(SyntheticPattern::Sine);
    spec.amplitude = 0.5;
    let signal = spec.render(SAMPLE_RATE, 1.0).samples;
    let features = extract_features(&signal, SAMPLE_RATE).unwrap();
    assert!(
        (features.rms_energy - 0.5 / 2f64.sqrt()).abs() < 0.01,
        "rms {}",
        features.rms_energy
    );
}

#[test]
fn test_zcr_invariant_to_positive_scaling() {
    let signal = render(SyntheticPattern::WhiteNoise, 0.5);
    let base = extract_features(&signal, SAMPLE_RATE).unwrap();
    for &scale in &[0.01f32, 0.5, 2.0, 100.0] {
        let scaled: Vec<f32> = signal.iter().map(|&s| s * scale).collect();
        let features = extract_features(&scaled, SAMPLE_RATE).unwrap();
        assert_eq!(features.zero_crossing_rate, base.zero_crossing_rate);
    }
}

#[test]
fn test_spectral_features_bounded_by_nyquist() {
    let nyquist = SAMPLE_RATE as f64 / 2.0;
    for pattern in [
        SyntheticPattern::Sine,
        SyntheticPattern::Square,
        SyntheticPattern::WhiteNoise,
        SyntheticPattern::ClickTrack,
    ] {
        let features = extract_features(&render(pattern, 1.0), SAMPLE_RATE).unwrap();
        assert!(
            (0.0..=nyquist).contains(&features.spectral_centroid_hz),
            "{:?} centroid {}",
            pattern,
            features.spectral_centroid_hz
        );
        assert!(
            (0.0..=nyquist).contains(&features.spectral_rolloff_hz),
            "{:?} rolloff {}",
            pattern,
            features.spectral_rolloff_hz
        );
    }
}

#[test]
fn test_tempo_within_search_range() {
    // the floored lower lag bound reports up to 60 * 86.13 / 28 BPM
    let (min_lag, _) = TempoEstimator::new(SAMPLE_RATE).lag_range();
    let fastest = 60.0 * SAMPLE_RATE as f64 / 512.0 / min_lag as f64;
    assert!((fastest - 184.5703125).abs() < 1e-9);
    for pattern in [
        SyntheticPattern::Sine,
        SyntheticPattern::Square,
        SyntheticPattern::WhiteNoise,
        SyntheticPattern::ClickTrack,
    ] {
        let features = extract_features(&render(pattern, 4.0), SAMPLE_RATE).unwrap();
        assert!(
            features.tempo_bpm == 0.0 || (60.0..=fastest).contains(&features.tempo_bpm),
            "{:?} tempo {}",
            pattern,
            features.tempo_bpm
        );
    }
}

#[test]
fn test_click_track_tempo() {
    let mut spec = SyntheticSpec::new(SyntheticPattern::ClickTrack);
    spec.bpm = 120.0;
    let signal = spec.render(SAMPLE_RATE, 8.0).samples;
    let features = extract_features(&signal, SAMPLE_RATE).unwrap();
    assert!(
        (features.tempo_bpm - 120.0).abs() < 3.0,
        "tempo {}",
        features.tempo_bpm
    );
}

#[test]
fn test_pulse_train_at_fastest_lag() {
    let period = 28 * 512;
    let signal: Vec<f32> = (0..SAMPLE_RATE as usize * 8)
        .map(|i| if i % period < 441 { 0.9 } else { 0.0 })
        .collect();
    let features = extract_features(&signal, SAMPLE_RATE).unwrap();
    assert!(
        (features.tempo_bpm - 184.5703125).abs() < 1e-6,
        "tempo {}",
        features.tempo_bpm
    );
}

#[test]
fn test_short_buffers_do_not_fail() {
    let signal = render(SyntheticPattern::Sine, 1.0);
    for &len in &[1usize, 2, 100, 1535, 2047] {
        let features = extract_features(&signal[..len], SAMPLE_RATE).unwrap();
        assert_eq!(features.tempo_bpm, 0.0, "len {}", len);
        assert!(features.spectral_centroid_hz.is_finite());
    }
}

#[test]
fn test_single_sample() {
    let features = extract_features(&[-0.5], SAMPLE_RATE).unwrap();
    assert_eq!(features.rms_energy, 0.5);
    assert_eq!(features.zero_crossing_rate, 0.0);
    assert_eq!(features.tempo_bpm, 0.0);
}

#[test]
fn test_extraction_is_bit_identical_across_calls() {
    let signal = render(SyntheticPattern::WhiteNoise, 3.0);
    let a = extract_features(&signal, SAMPLE_RATE).unwrap();
    let b = extract_features(&signal, SAMPLE_RATE).unwrap();
    for (x, y) in [
        (a.duration_seconds, b.duration_seconds),
        (a.rms_energy, b.rms_energy),
        (a.zero_crossing_rate, b.zero_crossing_rate),
        (a.spectral_centroid_hz, b.spectral_centroid_hz),
        (a.spectral_rolloff_hz, b.spectral_rolloff_hz),
        (a.tempo_bpm, b.tempo_bpm),
    ] {
        assert_eq!(x.to_bits(), y.to_bits());
    }
}

#[test]
fn test_concurrent_extractions_match_sequential() {
    let signals: Vec<Vec<f32>> = [
        SyntheticPattern::Sine,
        SyntheticPattern::WhiteNoise,
        SyntheticPattern::ClickTrack,
    ]
    .into_iter()
    .map(|pattern| render(pattern, 2.0))
    .collect();

    let sequential: Vec<FeatureRecord> = signals
        .iter()
        .map(|s| extract_features(s, SAMPLE_RATE).unwrap())
        .collect();

    let concurrent: Vec<FeatureRecord> = std::thread::scope(|scope| {
        let handles: Vec<_> = signals
            .iter()
            .map(|s| scope.spawn(move || extract_features(s, SAMPLE_RATE).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, concurrent);
}

#[test]
fn test_invalid_inputs() {
    let err = extract_features(&[], SAMPLE_RATE).unwrap_err();
    assert_eq!(err, InvalidInputError::EmptySamples);
    assert_eq!(err.code(), 3001);

    let err = extract_features(&[0.1, 0.2], 0).unwrap_err();
    assert_eq!(err, InvalidInputError::InvalidSampleRate { sample_rate: 0 });

    let err = extract_features(&[0.1, f32::NAN], SAMPLE_RATE).unwrap_err();
    assert_eq!(err, InvalidInputError::NonFiniteSample { index: 1 });
}

#[test]
fn test_waveform_duration_override() {
    let samples = vec![0.0f32; 4410];
    let waveform = Waveform::new(&samples, SAMPLE_RATE)
        .unwrap()
        .with_duration(0.25)
        .unwrap();
    let features = audio_features::FeatureExtractor::new().extract(&waveform);
    assert_eq!(features.duration_seconds, 0.25);
}

#[test]
fn test_record_serializes_contract_names() {
    let features = extract_features(&vec![0.0; 1000], 1000).unwrap();
    let json = serde_json::to_value(features).unwrap();
    let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "durationSeconds",
            "rmsEnergy",
            "spectralCentroidHz",
            "spectralRolloffHz",
            "tempoBpm",
            "zeroCrossingRate",
        ]
    );
}
