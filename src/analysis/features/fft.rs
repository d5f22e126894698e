// FFT module - Fast Fourier Transform computation
//
// This module handles FFT computation with windowing to reduce spectral
// leakage. The analysis window is zero-padded to twice its length so the
// kept half of the spectrum has one bin per analysis sample, spanning
// 0 Hz to Nyquist.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f64::consts::PI;
use std::sync::Arc;

/// Number of leading samples analyzed for spectral features
pub const ANALYSIS_WINDOW: usize = 2048;

/// FFT processor that computes magnitude spectra from audio windows
///
/// The plan and window are built once and never mutated, so a processor
/// can be shared across threads.
pub struct FftProcessor {
    fft: Arc<dyn Fft<f64>>,
    window_size: usize,
    /// Hann window for FFT (pre-computed)
    window: Vec<f64>,
}

impl FftProcessor {
    /// Create a new FFT processor
    ///
    /// # Arguments
    /// * `window_size` - Analysis window length; also the number of bins returned
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        let denom = (window_size as f64 - 1.0).max(1.0);
        let window = (0..window_size)
            .map(|i| 0.5 * (1.0 - ((2.0 * PI * i as f64) / denom).cos()))
            .collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(window_size * 2);

        Self {
            fft,
            window_size,
            window,
        }
    }

    /// Number of bins in each spectrum
    pub fn bin_count(&self) -> usize {
        self.window_size
    }

    /// Compute magnitude spectrum using FFT
    ///
    /// Takes the first `window_size` samples (zero-padding shorter input),
    /// applies the Hann window, zero-pads to `2 × window_size`, and returns
    /// the linear magnitudes of bins `0..window_size`.
    ///
    /// # Arguments
    /// * `audio` - Audio signal; only the opening window is read
    ///
    /// # Returns
    /// Magnitude spectrum (size = window_size)
    pub fn compute_magnitude_spectrum(&self, audio: &[f32]) -> Vec<f64> {
        let fft_size = self.window_size * 2;
        let mut buffer = vec![Complex::new(0.0, 0.0); fft_size];

        for ((slot, &sample), &w) in buffer.iter_mut().zip(audio).zip(&self.window) {
            *slot = Complex::new(sample as f64 * w, 0.0);
        }

        self.fft.process(&mut buffer);

        buffer[..self.window_size]
            .iter()
            .map(|c| {
                let magnitude = c.norm();
                if magnitude.is_finite() {
                    magnitude
                } else {
                    0.0
                }
            })
            .collect()
    }
}
