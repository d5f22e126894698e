// ExtractionSession: keyed, discardable extraction runs
//
// Single Responsibility: decide which extraction result is current
//
// A host that lets the user pick a new file while the previous one is still
// being analyzed must never show the old file's features for the new file.
// Every submission gets a generation number; a finished extraction is only
// published when its generation is still the latest.

use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::analysis::{FeatureExtractor, FeatureRecord};
use crate::error::{log_extraction_error, InvalidInputError};

/// Result of one extraction, tagged with the file it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOutcome {
    pub file_id: String,
    pub result: Result<FeatureRecord, InvalidInputError>,
}

struct SessionShared {
    generation: Mutex<u64>,
    outcome_tx: watch::Sender<Option<ExtractionOutcome>>,
}

impl SessionShared {
    fn bump_generation(&self) -> u64 {
        let mut generation = self.generation.lock().unwrap_or_else(|e| e.into_inner());
        *generation += 1;
        *generation
    }

    /// Publish `outcome` if `generation` is still current
    ///
    /// The generation lock is held across the send so a newer submission
    /// cannot slip in between the check and the publish.
    fn publish_if_current(&self, generation: u64, outcome: &ExtractionOutcome) -> bool {
        let current = self.generation.lock().unwrap_or_else(|e| e.into_inner());
        if *current != generation {
            tracing::debug!(
                "[ExtractionSession] Discarding stale result for {} (generation {} < {})",
                outcome.file_id,
                generation,
                *current
            );
            return false;
        }
        self.outcome_tx.send_replace(Some(outcome.clone()));
        true
    }
}

/// Runs extractions off the async executor and publishes only the latest
///
/// # Example
/// ```ignore
/// let session = ExtractionSession::new();
/// let mut rx = session.subscribe();
/// session.submit("track-a.wav", samples, 44100);
/// rx.changed().await?;
/// ```
pub struct ExtractionSession {
    extractor: Arc<FeatureExtractor>,
    shared: Arc<SessionShared>,
}

impl Default for ExtractionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionSession {
    /// Create a session using the standard extraction constants
    pub fn new() -> Self {
        Self::with_extractor(FeatureExtractor::new())
    }

    pub fn with_extractor(extractor: FeatureExtractor) -> Self {
        let (outcome_tx, _) = watch::channel(None);
        Self {
            extractor: Arc::new(extractor),
            shared: Arc::new(SessionShared {
                generation: Mutex::new(0),
                outcome_tx,
            }),
        }
    }

    /// Subscribe to published outcomes
    ///
    /// The receiver always holds the most recent current outcome (or None
    /// before the first one / after nothing was published).
    pub fn subscribe(&self) -> watch::Receiver<Option<ExtractionOutcome>> {
        self.shared.outcome_tx.subscribe()
    }

    /// Most recently published outcome
    pub fn latest(&self) -> Option<ExtractionOutcome> {
        self.shared.outcome_tx.borrow().clone()
    }

    /// Discard any in-flight extraction
    pub fn cancel(&self) {
        let generation = self.shared.bump_generation();
        tracing::debug!("[ExtractionSession] Cancelled (generation now {})", generation);
    }

    /// Start extracting features for `file_id`
    ///
    /// Supersedes every earlier submission. Must be called from within a
    /// tokio runtime; the DSP work runs on the blocking pool.
    ///
    /// # Returns
    /// A handle resolving to the published outcome, or `None` if this
    /// submission was superseded or cancelled before it finished.
    pub fn submit(
        &self,
        file_id: impl Into<String>,
        samples: Vec<f32>,
        sample_rate: u32,
    ) -> JoinHandle<Option<ExtractionOutcome>> {
        let file_id = file_id.into();
        let generation = self.shared.bump_generation();
        let extractor = Arc::clone(&self.extractor);
        let shared = Arc::clone(&self.shared);

        tracing::debug!(
            "[ExtractionSession] Submitted {} ({} samples @ {} Hz, generation {})",
            file_id,
            samples.len(),
            sample_rate,
            generation
        );

        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || {
                extractor.extract_samples(&samples, sample_rate)
            })
            .await;

            let result = match result {
                Ok(result) => result,
                Err(err) => {
                    tracing::error!(
                        "[ExtractionSession] Extraction task for {} failed: {}",
                        file_id,
                        err
                    );
                    return None;
                }
            };

            if let Err(err) = &result {
                log_extraction_error(err, &file_id);
            }

            let outcome = ExtractionOutcome { file_id, result };
            if shared.publish_if_current(generation, &outcome) {
                Some(outcome)
            } else {
                None
            }
        })
    }

    /// Submit and wait for the outcome
    ///
    /// # Returns
    /// `None` if a later submission or `cancel()` superseded this one
    pub async fn analyze(
        &self,
        file_id: impl Into<String>,
        samples: Vec<f32>,
        sample_rate: u32,
    ) -> Option<Result<FeatureRecord, InvalidInputError>> {
        self.submit(file_id, samples, sample_rate)
            .await
            .ok()
            .flatten()
            .map(|outcome| outcome.result)
    }
}
