// Managers Module
//
// Focused manager classes for hosts that run extractions in the background.
//
// Each manager handles one specific concern:
// - ExtractionSession: keyed extraction runs where only the latest result counts

pub mod extraction_session;

pub use extraction_session::{ExtractionOutcome, ExtractionSession};
