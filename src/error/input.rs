// Input validation error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Input error code constants
///
/// Error code range: 3001-3004
pub struct InvalidInputErrorCodes {}

impl InvalidInputErrorCodes {
    /// Sample buffer is empty
    pub const EMPTY_SAMPLES: i32 = 3001;

    /// Sample rate is zero
    pub const INVALID_SAMPLE_RATE: i32 = 3002;

    /// A sample is NaN or infinite
    pub const NON_FINITE_SAMPLE: i32 = 3003;

    /// Supplied duration is negative or not finite
    pub const INVALID_DURATION: i32 = 3004;
}

/// Log an extraction error with structured context
///
/// This function logs input errors with structured fields including:
/// - error_code: Numeric error code for programmatic handling
/// - component: The component where the error occurred
/// - message: Human-readable error message
/// - context: Additional contextual information (usually the file name)
pub fn log_extraction_error(err: &InvalidInputError, context: &str) {
    error!(
        "Extraction error in {}: code={}, component=Preprocessor, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Raised when a waveform cannot be analyzed at all
///
/// Validation happens once, before any analyzer runs, so a failed call never
/// yields a partially filled feature record.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    /// No samples were supplied
    EmptySamples,

    /// Sample rate must be greater than zero
    InvalidSampleRate { sample_rate: u32 },

    /// Sample at `index` is NaN or infinite
    NonFiniteSample { index: usize },

    /// Supplied duration is negative or not finite
    InvalidDuration { seconds: f64 },
}

impl ErrorCode for InvalidInputError {
    fn code(&self) -> i32 {
        match self {
            InvalidInputError::EmptySamples => InvalidInputErrorCodes::EMPTY_SAMPLES,
            InvalidInputError::InvalidSampleRate { .. } => {
                InvalidInputErrorCodes::INVALID_SAMPLE_RATE
            }
            InvalidInputError::NonFiniteSample { .. } => InvalidInputErrorCodes::NON_FINITE_SAMPLE,
            InvalidInputError::InvalidDuration { .. } => InvalidInputErrorCodes::INVALID_DURATION,
        }
    }

    fn message(&self) -> String {
        match self {
            InvalidInputError::EmptySamples => "Sample buffer is empty".to_string(),
            InvalidInputError::InvalidSampleRate { sample_rate } => {
                format!("Sample rate must be greater than 0 (got {})", sample_rate)
            }
            InvalidInputError::NonFiniteSample { index } => {
                format!("Sample {} is not a finite number", index)
            }
            InvalidInputError::InvalidDuration { seconds } => {
                format!("Duration must be finite and non-negative (got {})", seconds)
            }
        }
    }
}

impl fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InvalidInputError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for InvalidInputError {}
