// Waveform module - Input validation (preprocessor)
//
// Every analyzer assumes a non-empty, finite buffer and a positive sample
// rate. Those guarantees are established here, once, before any analysis.

use crate::error::InvalidInputError;

/// Validated mono PCM input
///
/// Borrows the caller's samples; extraction never mutates them.
#[derive(Debug, Clone, Copy)]
pub struct Waveform<'a> {
    samples: &'a [f32],
    sample_rate: u32,
    duration_seconds: f64,
}

impl<'a> Waveform<'a> {
    /// Validate a decoded sample buffer
    ///
    /// # Arguments
    /// * `samples` - Mono samples, nominally in [-1, 1]
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Errors
    /// `InvalidInputError` when the buffer is empty, the sample rate is 0,
    /// or any sample is NaN/infinite.
    pub fn new(samples: &'a [f32], sample_rate: u32) -> Result<Self, InvalidInputError> {
        if sample_rate == 0 {
            return Err(InvalidInputError::InvalidSampleRate { sample_rate });
        }
        if samples.is_empty() {
            return Err(InvalidInputError::EmptySamples);
        }
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(InvalidInputError::NonFiniteSample { index });
        }

        Ok(Self {
            samples,
            sample_rate,
            duration_seconds: samples.len() as f64 / sample_rate as f64,
        })
    }

    /// Override the derived duration with one reported by the decoder
    pub fn with_duration(mut self, seconds: f64) -> Result<Self, InvalidInputError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(InvalidInputError::InvalidDuration { seconds });
        }
        self.duration_seconds = seconds;
        Ok(self)
    }

    pub fn samples(&self) -> &'a [f32] {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }
}
