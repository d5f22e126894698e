// Types module - Data structures for audio features
//
// This module defines the output record of the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Scalar descriptors extracted from one waveform
///
/// Built once per extraction call and handed to downstream consumers
/// (visualization, genre scoring) which read it by field name. Serialized
/// field names and units are part of that contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    /// Signal duration in seconds
    pub duration_seconds: f64,

    /// Root-mean-square amplitude over the whole buffer (>= 0)
    pub rms_energy: f64,

    /// Sign changes divided by the sample count (0.0 to 1.0)
    pub zero_crossing_rate: f64,

    /// Magnitude-weighted mean frequency of the opening window, in Hz
    ///
    /// Measures the "brightness" of the sound. 0 when the window is silent.
    pub spectral_centroid_hz: f64,

    /// Frequency below which 85% of the opening window's magnitude lies, in Hz
    pub spectral_rolloff_hz: f64,

    /// Tempo estimate in beats per minute
    ///
    /// 0.0 means no periodicity was found.
    pub tempo_bpm: f64,
}

/// Replace NaN or infinite analyzer output with the documented fallback (0)
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_contract_field_names() {
        let record = FeatureRecord {
            duration_seconds: 1.0,
            rms_energy: 0.5,
            zero_crossing_rate: 0.1,
            spectral_centroid_hz: 440.0,
            spectral_rolloff_hz: 880.0,
            tempo_bpm: 120.0,
        };
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["durationSeconds"], 1.0);
        assert_eq!(json["rmsEnergy"], 0.5);
        assert_eq!(json["zeroCrossingRate"], 0.1);
        assert_eq!(json["spectralCentroidHz"], 440.0);
        assert_eq!(json["spectralRolloffHz"], 880.0);
        assert_eq!(json["tempoBpm"], 120.0);
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(1.5), 1.5);
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
    }
}
