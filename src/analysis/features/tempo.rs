// Tempo module - Autocorrelation tempo estimate
//
// A short-time energy envelope is computed over the whole signal,
// mean-centered, and autocorrelated over the lags that correspond to the
// searched BPM range. The best lag becomes the tempo. This is a coarse
// periodicity heuristic, not a beat tracker.

use super::types::finite_or_zero;

/// Energy envelope frame length in samples
pub const FRAME_SIZE: usize = 1024;

/// Energy envelope hop in samples
pub const HOP_SIZE: usize = 512;

/// Slowest tempo searched
pub const MIN_BPM: f64 = 60.0;

/// Fastest tempo searched
pub const MAX_BPM: f64 = 180.0;

/// Relative deviation below which the envelope is considered flat
const FLAT_ENVELOPE_TOLERANCE: f64 = 1e-9;

/// Autocorrelation-based tempo estimator
pub struct TempoEstimator {
    sample_rate: u32,
    frame_size: usize,
    hop_size: usize,
    min_bpm: f64,
    max_bpm: f64,
}

impl TempoEstimator {
    /// Create an estimator with the default frame/hop and 60-180 BPM range
    pub fn new(sample_rate: u32) -> Self {
        Self::with_params(sample_rate, FRAME_SIZE, HOP_SIZE, MIN_BPM, MAX_BPM)
    }

    pub fn with_params(
        sample_rate: u32,
        frame_size: usize,
        hop_size: usize,
        min_bpm: f64,
        max_bpm: f64,
    ) -> Self {
        Self {
            sample_rate,
            frame_size: frame_size.max(1),
            hop_size: hop_size.max(1),
            min_bpm,
            max_bpm,
        }
    }

    /// Envelope frames per second
    pub fn frame_rate(&self) -> f64 {
        self.sample_rate as f64 / self.hop_size as f64
    }

    /// Inclusive lag range searched, in envelope frames
    ///
    /// `floor(frameRate × 60 / maxBpm)` to `floor(frameRate × 60 / minBpm)`.
    /// Flooring the lower bound lets the fastest lag report slightly above
    /// `maxBpm` (184.57 BPM at 44.1 kHz).
    pub fn lag_range(&self) -> (usize, usize) {
        let frame_rate = self.frame_rate();

        let min_lag = ((60.0 / self.max_bpm) * frame_rate).floor().max(1.0) as usize;
        let max_lag = ((60.0 / self.min_bpm) * frame_rate).floor().max(0.0) as usize;

        (min_lag, max_lag)
    }

    fn lag_to_bpm(&self, lag: usize) -> f64 {
        60.0 * self.frame_rate() / lag as f64
    }

    /// Compute the mean-centered short-time energy envelope
    ///
    /// Frame `i` covers samples `[i × hop, i × hop + frame)` and its value is
    /// the sum of squared samples. The frame count is
    /// `floor((N - frame) / hop)`, or 0 when the signal is shorter than a frame.
    pub fn energy_envelope(&self, audio: &[f32]) -> Vec<f64> {
        let frames = audio.len().saturating_sub(self.frame_size) / self.hop_size;
        if frames == 0 {
            return Vec::new();
        }

        let mut envelope: Vec<f64> = (0..frames)
            .map(|i| {
                let start = i * self.hop_size;
                audio[start..start + self.frame_size]
                    .iter()
                    .map(|&s| {
                        let s = s as f64;
                        s * s
                    })
                    .sum()
            })
            .collect();

        let mean = envelope.iter().sum::<f64>() / envelope.len() as f64;
        for value in envelope.iter_mut() {
            *value -= mean;
        }

        envelope
    }

    /// Find the lag with the largest unnormalized autocorrelation
    ///
    /// Only lags with at least one overlapping pair are evaluated. Ties keep
    /// the lowest lag.
    ///
    /// # Returns
    /// `Some((lag, value))`, or `None` if no lag in range could be evaluated
    pub fn best_lag(&self, envelope: &[f64]) -> Option<(usize, f64)> {
        let (min_lag, max_lag) = self.lag_range();
        let upper = max_lag.min(envelope.len().saturating_sub(1));

        let mut best: Option<(usize, f64)> = None;
        let mut best_val = f64::NEG_INFINITY;
        for lag in min_lag..=upper {
            let acc: f64 = envelope[..envelope.len() - lag]
                .iter()
                .zip(&envelope[lag..])
                .map(|(a, b)| a * b)
                .sum();
            if acc > best_val {
                best_val = acc;
                best = Some((lag, acc));
            }
        }

        best
    }

    /// Estimate tempo in BPM
    ///
    /// # Returns
    /// Tempo between `lag_to_bpm(max_lag)` and `lag_to_bpm(min_lag)`, or 0.0 when the envelope is too short
    /// or flat (no periodicity)
    pub fn estimate(&self, audio: &[f32]) -> f64 {
        let envelope = self.energy_envelope(audio);
        if envelope.is_empty() {
            return 0.0;
        }

        if self.is_flat(audio, &envelope) {
            tracing::debug!("[TempoEstimator] Flat energy envelope, no periodicity");
            return 0.0;
        }

        match self.best_lag(&envelope) {
            Some((lag, _)) if lag > 0 => finite_or_zero(self.lag_to_bpm(lag)),
            _ => {
                tracing::debug!(
                    "[TempoEstimator] No lag evaluated ({} envelope frames)",
                    envelope.len()
                );
                0.0
            }
        }
    }

    /// A mean-centered envelope whose largest deviation is negligible next
    /// to the largest possible frame energy
    fn is_flat(&self, audio: &[f32], centered: &[f64]) -> bool {
        let max_deviation = centered.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
        if max_deviation == 0.0 {
            return true;
        }
        let peak = audio.iter().fold(0.0f64, |acc, &s| acc.max((s as f64).abs()));
        let max_frame_energy = peak * peak * self.frame_size as f64;
        max_deviation <= FLAT_ENVELOPE_TOLERANCE * max_frame_energy
    }
}
