// Temporal module - Time-domain feature extraction
//
// This module computes features directly from the full time-domain signal:
// RMS energy and zero-crossing rate.
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

use super::types::finite_or_zero;

/// Temporal feature computation functions
pub struct TemporalFeatures;

impl TemporalFeatures {
    /// Compute root-mean-square energy
    ///
    /// Formula: RMS = sqrt((1 / N) × Σ x[n]²)
    ///
    /// # Arguments
    /// * `audio` - Time-domain audio signal
    ///
    /// # Returns
    /// RMS amplitude (>= 0), 0.0 for an empty slice
    pub fn compute_rms(audio: &[f32]) -> f64 {
        if audio.is_empty() {
            return 0.0;
        }

        let sum_squares: f64 = audio
            .iter()
            .map(|&x| {
                let x = x as f64;
                x * x
            })
            .sum();

        finite_or_zero((sum_squares / audio.len() as f64).sqrt())
    }

    /// Compute zero-crossing rate (ZCR)
    ///
    /// A crossing is counted between consecutive samples when one is
    /// negative and the other is not (0 counts as non-negative).
    ///
    /// The count comes from N - 1 comparisons but is divided by N, the full
    /// sample count. Downstream consumers were tuned against this
    /// normalization, so it stays.
    ///
    /// # Arguments
    /// * `audio` - Time-domain audio signal
    ///
    /// # Returns
    /// Zero-crossing rate (0.0 to 1.0)
    pub fn compute_zcr(audio: &[f32]) -> f64 {
        if audio.len() < 2 {
            return 0.0;
        }

        let crossings = audio
            .windows(2)
            .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
            .count();

        crossings as f64 / audio.len() as f64
    }
}
