// Spectral module - Frequency-domain feature extraction
//
// This module computes spectral features from magnitude spectra.
// Centroid and rolloff read the same magnitude array and the same bin
// frequencies, so the two values are always consistent with each other.
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

use super::types::finite_or_zero;

/// Spectral rolloff threshold (85% of total magnitude)
pub const ROLLOFF_THRESHOLD: f64 = 0.85;

/// Spectral feature computation functions
pub struct SpectralFeatures {
    sample_rate: u32,
    bin_count: usize,
    rolloff_fraction: f64,
}

impl SpectralFeatures {
    /// Create a new spectral features processor
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `bin_count` - Number of magnitude bins spanning 0 Hz to Nyquist
    pub fn new(sample_rate: u32, bin_count: usize) -> Self {
        Self::with_rolloff_fraction(sample_rate, bin_count, ROLLOFF_THRESHOLD)
    }

    pub fn with_rolloff_fraction(sample_rate: u32, bin_count: usize, rolloff_fraction: f64) -> Self {
        Self {
            sample_rate,
            bin_count: bin_count.max(1),
            rolloff_fraction,
        }
    }

    /// Frequency of bin `k`: k × sampleRate / (2N)
    pub fn bin_frequency(&self, bin: usize) -> f64 {
        bin as f64 * self.sample_rate as f64 / (2.0 * self.bin_count as f64)
    }

    /// Compute spectral centroid (weighted mean frequency)
    ///
    /// Formula: centroid = Σ(f_k × |X[k]|) / Σ|X[k]|
    ///
    /// # Arguments
    /// * `spectrum` - Linear magnitude spectrum
    ///
    /// # Returns
    /// Spectral centroid in Hz, 0.0 if total magnitude is 0
    pub fn compute_centroid(&self, spectrum: &[f64]) -> f64 {
        let magnitude_sum: f64 = spectrum.iter().sum();
        if magnitude_sum <= 0.0 {
            return 0.0;
        }

        let weighted_sum: f64 = spectrum
            .iter()
            .enumerate()
            .map(|(k, &mag)| self.bin_frequency(k) * mag)
            .sum();

        finite_or_zero(weighted_sum / magnitude_sum)
    }

    /// Compute spectral rolloff
    ///
    /// Returns the frequency of the first bin at which the cumulative
    /// magnitude reaches the rolloff fraction of the total. Magnitudes are
    /// summed linearly, not squared.
    ///
    /// # Arguments
    /// * `spectrum` - Linear magnitude spectrum
    ///
    /// # Returns
    /// Rolloff frequency in Hz; 0.0 for a silent spectrum or when the
    /// threshold is never reached
    pub fn compute_rolloff(&self, spectrum: &[f64]) -> f64 {
        let total: f64 = spectrum.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return 0.0;
        }

        let threshold = self.rolloff_fraction * total;
        let mut cumulative = 0.0;
        for (k, &mag) in spectrum.iter().enumerate() {
            cumulative += mag;
            if cumulative >= threshold {
                return self.bin_frequency(k);
            }
        }

        0.0
    }
}
