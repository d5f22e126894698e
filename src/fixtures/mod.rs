//! WAV decoding and synthetic signal fixtures.
//!
//! The extraction core only accepts decoded mono PCM. This module is the
//! decoder collaborator used by the CLI and tests: it reads WAV files with
//! `hound` (downmixing to mono) and renders deterministic synthetic signals
//! that can be written back out as fixtures.

use anyhow::{anyhow, Context, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;

/// Decoded mono PCM plus its sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// Supported deterministic waveform patterns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SyntheticPattern {
    Sine,
    Square,
    WhiteNoise,
    ClickTrack,
    Silence,
}

/// Configuration for synthetic fixtures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyntheticSpec {
    pub pattern: SyntheticPattern,
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: f64,
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    /// Click rate for `ClickTrack`
    #[serde(default = "default_bpm")]
    pub bpm: f64,
    /// Seed for `WhiteNoise`
    #[serde(default)]
    pub seed: u64,
}

fn default_frequency_hz() -> f64 {
    440.0
}

fn default_amplitude() -> f32 {
    1.0
}

fn default_bpm() -> f64 {
    120.0
}

/// Length of each click in a click track
const CLICK_SECONDS: f64 = 0.01;

/// Oscillation inside a click, in cycles per second
const CLICK_TONE_HZ: f64 = 2000.0;

impl SyntheticSpec {
    pub fn new(pattern: SyntheticPattern) -> Self {
        Self {
            pattern,
            frequency_hz: default_frequency_hz(),
            amplitude: default_amplitude(),
            bpm: default_bpm(),
            seed: 0,
        }
    }

    /// Render `duration_secs` of the pattern at `sample_rate`
    pub fn render(&self, sample_rate: u32, duration_secs: f64) -> DecodedAudio {
        let frames = (sample_rate as f64 * duration_secs.max(0.0)).round() as usize;
        let rate = sample_rate.max(1) as f64;
        let amplitude = self.amplitude;

        let samples = match self.pattern {
            SyntheticPattern::Sine => (0..frames)
                .map(|i| (2.0 * PI * self.frequency_hz * i as f64 / rate).sin() as f32 * amplitude)
                .collect(),
            SyntheticPattern::Square => (0..frames)
                .map(|i| {
                    let phase = (self.frequency_hz * i as f64 / rate).fract();
                    if phase < 0.5 {
                        amplitude
                    } else {
                        -amplitude
                    }
                })
                .collect(),
            SyntheticPattern::WhiteNoise => {
                let mut rng = StdRng::seed_from_u64(self.seed);
                let bound = amplitude.abs().max(f32::MIN_POSITIVE);
                (0..frames).map(|_| rng.gen_range(-bound..bound)).collect()
            }
            SyntheticPattern::ClickTrack => {
                let period = ((rate * 60.0 / self.bpm.max(1.0)).round() as usize).max(1);
                let click_len = ((rate * CLICK_SECONDS) as usize).clamp(1, period);
                (0..frames)
                    .map(|i| {
                        let offset = i % period;
                        if offset < click_len {
                            (2.0 * PI * CLICK_TONE_HZ * offset as f64 / rate).sin() as f32
                                * amplitude
                        } else {
                            0.0
                        }
                    })
                    .collect()
            }
            SyntheticPattern::Silence => vec![0.0; frames],
        };

        DecodedAudio {
            samples,
            sample_rate,
        }
    }
}

/// Read a WAV file into mono `f32` samples
///
/// Float and 16/24/32-bit integer PCM are supported. Multi-channel audio is
/// averaged down to one channel.
pub fn read_wav(path: &Path) -> Result<DecodedAudio> {
    let mut reader =
        hound::WavReader::open(path).with_context(|| format!("opening {}", path.display()))?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(anyhow!("{} has zero channels", path.display()));
    }

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|sample| sample.map_err(|err| anyhow!(err)))
            .collect::<Result<Vec<f32>>>()?,
        hound::SampleFormat::Int => {
            let max = ((1i64 << (spec.bits_per_sample.clamp(1, 32) - 1)) - 1).max(1) as f32;
            match spec.bits_per_sample {
                8 => reader
                    .samples::<i8>()
                    .map(|sample| {
                        sample
                            .map(|value| value as f32 / max)
                            .map_err(|err| anyhow!(err))
                    })
                    .collect::<Result<Vec<f32>>>()?,
                16 => reader
                    .samples::<i16>()
                    .map(|sample| {
                        sample
                            .map(|value| value as f32 / max)
                            .map_err(|err| anyhow!(err))
                    })
                    .collect::<Result<Vec<f32>>>()?,
                24 | 32 => reader
                    .samples::<i32>()
                    .map(|sample| {
                        sample
                            .map(|value| value as f32 / max)
                            .map_err(|err| anyhow!(err))
                    })
                    .collect::<Result<Vec<f32>>>()?,
                other => {
                    return Err(anyhow!(
                        "Unsupported bits per sample {} in {}",
                        other,
                        path.display()
                    ))
                }
            }
        }
    };

    let channels = spec.channels as usize;
    let samples = if channels == 1 {
        samples
    } else {
        samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    Ok(DecodedAudio {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Write mono `f32` samples as a 32-bit float WAV file
pub fn write_wav(path: &Path, audio: &DecodedAudio) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer =
        hound::WavWriter::create(path, spec).with_context(|| format!("creating {}", path.display()))?;
    for &sample in &audio.samples {
        writer
            .write_sample(sample)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer
        .finalize()
        .with_context(|| format!("finalizing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests;
