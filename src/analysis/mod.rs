// Analysis module - feature extraction entry point
//
// `extract_features` is the boundary the rest of an application talks to:
// decoded mono samples in, one FeatureRecord out. It keeps no state between
// calls, so it is safe to call from any number of threads at once.

pub mod features;

pub use features::{FeatureExtractor, FeatureRecord, Waveform};

use crate::error::InvalidInputError;

/// Extract the standard feature set from decoded mono samples
///
/// # Arguments
/// * `samples` - Mono PCM samples, nominally in [-1, 1]
/// * `sample_rate` - Sample rate in Hz
///
/// # Errors
/// `InvalidInputError` for an empty buffer, zero sample rate, or
/// non-finite samples. No partial record is ever returned.
pub fn extract_features(
    samples: &[f32],
    sample_rate: u32,
) -> Result<FeatureRecord, InvalidInputError> {
    FeatureExtractor::new().extract_samples(samples, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_is_idempotent() {
        let samples: Vec<f32> = (0..30000)
            .map(|i| ((i as f32) * 0.05).sin() * ((i / 7000) as f32 * 0.2 + 0.1))
            .collect();
        let first = extract_features(&samples, 44100).unwrap();
        let second = extract_features(&samples, 44100).unwrap();

        assert_eq!(first.tempo_bpm.to_bits(), second.tempo_bpm.to_bits());
        assert_eq!(
            first.spectral_centroid_hz.to_bits(),
            second.spectral_centroid_hz.to_bits()
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_input_buffer_is_untouched() {
        let samples = vec![0.25f32, -0.5, 0.75, -1.0];
        let copy = samples.clone();
        extract_features(&samples, 8000).unwrap();
        assert_eq!(samples, copy);
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let samples = [0.0f32, f32::NEG_INFINITY];
        assert_eq!(
            extract_features(&samples, 44100).unwrap_err(),
            InvalidInputError::NonFiniteSample { index: 1 }
        );
    }
}
