// Error types for the audio feature extractor
//
// This module defines the error raised when a waveform cannot be analyzed,
// with numeric error codes so callers can branch on the failure kind without
// matching on message text.

mod input;

pub use input::{log_extraction_error, InvalidInputError, InvalidInputErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
