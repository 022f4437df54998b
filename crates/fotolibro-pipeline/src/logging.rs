//! Structured submission logging utilities.
//!
//! Provides consistent, structured logging for pipeline runs with
//! contextual information (submission id, phase).

use tracing::{error, info, warn, Span};
use uuid::Uuid;

/// Submission logger with consistent formatting.
#[derive(Debug, Clone)]
pub struct SubmissionLogger {
    submission_id: String,
    client_name: String,
}

impl SubmissionLogger {
    pub fn new(submission_id: &Uuid, client_name: &str) -> Self {
        Self {
            submission_id: submission_id.to_string(),
            client_name: client_name.to_string(),
        }
    }

    /// Log the start of a pipeline phase.
    pub fn phase_start(&self, phase: &str) {
        info!(
            submission_id = %self.submission_id,
            client = %self.client_name,
            phase = phase,
            "Phase started"
        );
    }

    /// Log the completion of a pipeline phase.
    pub fn phase_done(&self, phase: &str, elapsed_ms: u64) {
        info!(
            submission_id = %self.submission_id,
            client = %self.client_name,
            phase = phase,
            elapsed_ms = elapsed_ms,
            "Phase completed"
        );
    }

    /// Log a warning recorded during the run.
    pub fn warning(&self, phase: &str, message: &str) {
        warn!(
            submission_id = %self.submission_id,
            phase = phase,
            "Submission warning: {}", message
        );
    }

    /// Log a recovered phase failure.
    pub fn recovered(&self, phase: &str, message: &str) {
        error!(
            submission_id = %self.submission_id,
            phase = phase,
            "Phase failed, fallback applied: {}", message
        );
    }

    /// Create a tracing span for this submission.
    pub fn span(&self) -> Span {
        tracing::info_span!(
            "submission",
            submission_id = %self.submission_id,
            client = %self.client_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let id = Uuid::new_v4();
        let logger = SubmissionLogger::new(&id, "Maria");
        assert_eq!(logger.submission_id, id.to_string());
        assert_eq!(logger.client_name, "Maria");
    }
}
