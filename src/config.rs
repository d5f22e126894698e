//! Configuration management for the feature extraction pipeline
//!
//! This module provides runtime configuration loading from JSON files.
//! The defaults are the fixed constants of the extraction heuristics; a
//! config file only exists so the CLI can experiment with other windows
//! without recompiling. `extract_features` always runs with the defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Feature extraction parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of leading samples analyzed by the spectral analyzer
    pub spectral_window: usize,
    /// Energy envelope frame length in samples
    pub frame_size: usize,
    /// Energy envelope hop in samples
    pub hop_size: usize,
    /// Slowest tempo searched (sets the largest lag)
    pub min_bpm: f64,
    /// Fastest tempo searched (sets the smallest lag)
    pub max_bpm: f64,
    /// Fraction of total magnitude that defines the rolloff bin
    pub rolloff_fraction: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            spectral_window: 2048,
            frame_size: 1024,
            hop_size: 512,
            min_bpm: 60.0,
            max_bpm: 180.0,
            rolloff_fraction: 0.85,
        }
    }
}

impl ExtractionConfig {
    /// Check that every parameter can drive the pipeline
    ///
    /// # Returns
    /// * `Ok(())` - parameters are usable
    /// * `Err(reason)` - first offending parameter
    pub fn validate(&self) -> Result<(), String> {
        if self.spectral_window == 0 {
            return Err("spectral_window must be > 0".to_string());
        }
        if self.frame_size == 0 || self.hop_size == 0 {
            return Err(format!(
                "frame_size and hop_size must be > 0 (got {} / {})",
                self.frame_size, self.hop_size
            ));
        }
        if !(self.min_bpm.is_finite() && self.max_bpm.is_finite()) || self.min_bpm <= 0.0 {
            return Err(format!(
                "BPM bounds must be finite and positive (got {} / {})",
                self.min_bpm, self.max_bpm
            ));
        }
        if self.min_bpm >= self.max_bpm {
            return Err(format!(
                "min_bpm must be below max_bpm (got {} >= {})",
                self.min_bpm, self.max_bpm
            ));
        }
        if !(self.rolloff_fraction > 0.0 && self.rolloff_fraction <= 1.0) {
            return Err(format!(
                "rolloff_fraction must be in (0, 1] (got {})",
                self.rolloff_fraction
            ));
        }
        Ok(())
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON reports
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The loaded configuration, or the defaults if the file is missing,
    /// is not valid JSON, or carries unusable extraction parameters.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                return Self::default();
            }
        };

        let config: AppConfig = match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                log::warn!(
                    "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                return Self::default();
            }
        };

        if let Err(reason) = config.extraction.validate() {
            log::warn!(
                "[Config] Invalid extraction parameters in {:?}: {}. Using defaults.",
                path.as_ref(),
                reason
            );
            return Self::default();
        }

        log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
        config
    }
}
