//! Pipeline error types.

use fotolibro_models::Phase;
use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// No photos were submitted; nothing to curate.
    #[error("Submission contains no photos")]
    EmptySubmission,

    /// Phase 1 could not run at all. Fatal: no meaningful fallback exists.
    #[error("Vision analysis failed: {0}")]
    VisionAnalysisFailed(String),

    /// Phase 5 failed. Fatal: the curator is a pure function, so a failure
    /// here is a programming defect rather than an external-service issue.
    #[error("Design curation failed: {0}")]
    DesignCurationFailed(String),

    /// A recoverable phase failure that was converted into a fallback.
    /// Carried in the output's error list, never returned to the caller.
    #[error("Phase {phase} failed: {message}")]
    PhaseFailed { phase: Phase, message: String },

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }

    pub fn phase_failed(phase: Phase, msg: impl std::fmt::Display) -> Self {
        Self::PhaseFailed {
            phase,
            message: msg.to_string(),
        }
    }

    /// Whether the error aborts the whole submission. Only vision analysis
    /// and design curation are fatal; every other phase degrades.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::EmptySubmission | Self::VisionAnalysisFailed(_) | Self::DesignCurationFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(PipelineError::EmptySubmission.is_fatal());
        assert!(PipelineError::VisionAnalysisFailed("x".into()).is_fatal());
        assert!(PipelineError::DesignCurationFailed("x".into()).is_fatal());
        assert!(!PipelineError::phase_failed(Phase::MotifDetection, "x").is_fatal());
    }
}
