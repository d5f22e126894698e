// Audio Features Core - track-level feature extraction
// Decoded mono PCM in, a fixed set of scalar descriptors out

// Module declarations
pub mod analysis;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod managers;

// Re-exports for convenience
pub use analysis::{extract_features, FeatureExtractor, FeatureRecord, Waveform};
pub use config::{AppConfig, ExtractionConfig};
pub use error::{ErrorCode, InvalidInputError};
pub use managers::{ExtractionOutcome, ExtractionSession};
