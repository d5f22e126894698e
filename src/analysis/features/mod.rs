// FeatureExtractor - DSP feature extraction for track-level descriptors
//
// This module turns a decoded mono waveform into a small fixed set of scalar
// descriptors used for visualization and genre scoring.
//
// Module organization:
// - waveform: Input validation (Waveform)
// - types: Output record (FeatureRecord)
// - temporal: Time-domain features over the full signal (RMS, ZCR)
// - fft: Magnitude spectrum of the opening window
// - spectral: Frequency-domain features (centroid, rolloff)
// - tempo: Energy-envelope autocorrelation tempo estimate
// - mod.rs: Coordinator (FeatureExtractor)
//
// Data flow: Waveform -> {temporal, fft+spectral, tempo} -> FeatureRecord.
// The three analyzers share nothing but the validated input.

mod fft;
mod spectral;
mod tempo;
mod temporal;
mod types;
mod waveform;

pub use fft::{FftProcessor, ANALYSIS_WINDOW};
pub use spectral::{SpectralFeatures, ROLLOFF_THRESHOLD};
pub use tempo::{TempoEstimator, FRAME_SIZE, HOP_SIZE, MAX_BPM, MIN_BPM};
pub use temporal::TemporalFeatures;
pub use types::FeatureRecord;
pub use waveform::Waveform;

use crate::config::ExtractionConfig;
use crate::error::InvalidInputError;

/// FeatureExtractor coordinates the DSP feature extraction pipeline
///
/// Holds only immutable state (the FFT plan and window), so one extractor
/// can serve concurrent calls for different sample rates and buffers.
pub struct FeatureExtractor {
    fft_processor: FftProcessor,
    config: ExtractionConfig,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor {
    /// Create a FeatureExtractor with the standard constants
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    /// Create a FeatureExtractor with custom window, hop, and BPM parameters
    ///
    /// The config should have passed `ExtractionConfig::validate`; zero sizes
    /// are clamped to 1 rather than panicking.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self {
            fft_processor: FftProcessor::new(config.spectral_window),
            config,
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Validate raw samples and extract features
    ///
    /// # Errors
    /// `InvalidInputError` for an empty buffer, zero sample rate, or
    /// non-finite samples. Nothing is computed in that case.
    pub fn extract_samples(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<FeatureRecord, InvalidInputError> {
        let waveform = Waveform::new(samples, sample_rate)?;
        Ok(self.extract(&waveform))
    }

    /// Extract all features from a validated waveform
    ///
    /// This method coordinates the entire feature extraction pipeline:
    /// 1. Temporal features over the whole signal
    /// 2. Magnitude spectrum of the first `spectral_window` samples
    /// 3. Spectral centroid and rolloff from that one spectrum
    /// 4. Tempo from the energy envelope of the whole signal
    /// 5. Combine into FeatureRecord
    pub fn extract(&self, waveform: &Waveform<'_>) -> FeatureRecord {
        let audio = waveform.samples();
        let sample_rate = waveform.sample_rate();

        let rms_energy = TemporalFeatures::compute_rms(audio);
        let zero_crossing_rate = TemporalFeatures::compute_zcr(audio);

        let spectrum = self.fft_processor.compute_magnitude_spectrum(audio);
        let spectral = SpectralFeatures::with_rolloff_fraction(
            sample_rate,
            self.fft_processor.bin_count(),
            self.config.rolloff_fraction,
        );
        let spectral_centroid_hz = spectral.compute_centroid(&spectrum);
        let spectral_rolloff_hz = spectral.compute_rolloff(&spectrum);

        let tempo_bpm = TempoEstimator::with_params(
            sample_rate,
            self.config.frame_size,
            self.config.hop_size,
            self.config.min_bpm,
            self.config.max_bpm,
        )
        .estimate(audio);

        let features = FeatureRecord {
            duration_seconds: waveform.duration_seconds(),
            rms_energy,
            zero_crossing_rate,
            spectral_centroid_hz,
            spectral_rolloff_hz,
            tempo_bpm,
        };

        tracing::debug!(
            samples = audio.len(),
            sample_rate,
            "[FeatureExtractor] Extracted {:?}",
            features
        );

        features
    }
}
