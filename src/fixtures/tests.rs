use super::*;
use std::path::PathBuf;

fn temp_wav(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "audio_features_fixture_{}_{}.wav",
        name,
        std::process::id()
    ))
}

#[test]
fn render_produces_requested_length() {
    let audio = SyntheticSpec::new(SyntheticPattern::Sine).render(22050, 0.5);
    assert_eq!(audio.sample_rate, 22050);
    assert_eq!(audio.samples.len(), 11025);
}

#[test]
fn silence_is_all_zero() {
    let audio = SyntheticSpec::new(SyntheticPattern::Silence).render(8000, 1.0);
    assert!(audio.samples.iter().all(|&s| s == 0.0));
}

#[test]
fn white_noise_is_seeded() {
    let mut spec = SyntheticSpec::new(SyntheticPattern::WhiteNoise);
    spec.seed = 42;
    let a = spec.render(8000, 0.1);
    let b = spec.render(8000, 0.1);
    assert_eq!(a, b);
    assert!(a.samples.iter().all(|s| s.abs() <= 1.0));
}

#[test]
fn square_wave_alternates_sign() {
    let mut spec = SyntheticSpec::new(SyntheticPattern::Square);
    spec.frequency_hz = 100.0;
    spec.amplitude = 0.5;
    let audio = spec.render(8000, 0.02);
    assert_eq!(audio.samples[0], 0.5);
    assert_eq!(audio.samples[50], -0.5);
}

#[test]
fn click_track_has_silence_between_clicks() {
    let mut spec = SyntheticSpec::new(SyntheticPattern::ClickTrack);
    spec.bpm = 120.0;
    let audio = spec.render(44100, 1.0);
    // one click at 0 s and one at 0.5 s
    assert!(audio.samples[..441].iter().any(|s| s.abs() > 0.5));
    assert!(audio.samples[1000..22050].iter().all(|&s| s == 0.0));
    assert!(audio.samples[22050..22491].iter().any(|s| s.abs() > 0.5));
}

#[test]
fn wav_round_trip_preserves_samples() {
    let path = temp_wav("round_trip");
    let audio = SyntheticSpec::new(SyntheticPattern::Sine).render(16000, 0.25);
    write_wav(&path, &audio).unwrap();
    let decoded = read_wav(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(decoded, audio);
}

#[test]
fn stereo_int_wav_is_downmixed() {
    let path = temp_wav("stereo");
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for _ in 0..100 {
        writer.write_sample(i16::MAX).unwrap();
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();

    let decoded = read_wav(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(decoded.sample_rate, 8000);
    assert_eq!(decoded.samples.len(), 100);
    assert!(decoded.samples.iter().all(|&s| (s - 0.5).abs() < 1e-6));
}

#[test]
fn eight_bit_int_wav_is_scaled() {
    let path = temp_wav("eight_bit");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 8,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for _ in 0..50 {
        writer.write_sample(i8::MAX).unwrap();
        writer.write_sample(0i8).unwrap();
    }
    writer.finalize().unwrap();

    let decoded = read_wav(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(decoded.sample_rate, 8000);
    assert_eq!(decoded.samples.len(), 100);
    for pair in decoded.samples.chunks(2) {
        assert!((pair[0] - 1.0).abs() < 1e-6);
        assert_eq!(pair[1], 0.0);
    }
}

#[test]
fn missing_file_is_an_error() {
    let err = read_wav(Path::new("/nonexistent/missing.wav")).unwrap_err();
    assert!(err.to_string().contains("opening"));
}
