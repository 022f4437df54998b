//! Whole-album motif detection.
//!
//! The detector contributes no inference of its own: it builds a summary of
//! the album, makes one batched classification call, validates the returned
//! motif against the closed set, and merges in the static configuration for
//! that motif. Failure degrades to the generic motif with zero confidence.

use std::sync::Arc;

use tracing::{info, warn};

use fotolibro_models::{EventMotifProfile, Motif, PhotoAnalysis};
use fotolibro_vision::VisionService;

use crate::motif_table::motif_config;

/// Outcome of motif detection: the profile plus an optional low-confidence
/// warning for the orchestrator's warning list.
#[derive(Debug, Clone)]
pub struct MotifOutcome {
    pub profile: EventMotifProfile,
    pub warning: Option<String>,

    /// Recovered failure, if the capability call or its validation failed
    pub error: Option<String>,
}

/// Classify the album into a life-event motif.
///
/// Never errors: an adapter failure (including contract violations) yields
/// the generic motif with confidence 0, a designed fallback rather than an
/// error state for callers.
pub async fn detect_motif(
    service: &Arc<dyn VisionService>,
    analyses: &[PhotoAnalysis],
    client_hint: Option<&str>,
    confidence_threshold: u8,
) -> MotifOutcome {
    let summaries: Vec<String> = analyses.iter().map(|a| a.summary()).collect();

    let (motif, confidence, evidence, error) =
        match service.detect_motif(&summaries, client_hint).await {
            Ok(detection) => match detection.motif() {
                Ok(motif) => (motif, detection.confidence.min(100), detection.evidence, None),
                Err(e) => {
                    warn!(error = %e, "Motif response out of enum, using generic fallback");
                    (Motif::Generic, 0, String::new(), Some(e.to_string()))
                }
            },
            Err(e) => {
                warn!(error = %e, "Motif detection failed, using generic fallback");
                (Motif::Generic, 0, String::new(), Some(e.to_string()))
            }
        };

    info!(motif = %motif, confidence = confidence, "Motif detected");

    let warning = (confidence < confidence_threshold).then(|| {
        format!(
            "motif confidence {} below threshold {} for '{}'",
            confidence, confidence_threshold, motif
        )
    });

    let config = motif_config(motif);
    MotifOutcome {
        profile: EventMotifProfile {
            motif,
            confidence,
            evidence,
            design: config.design,
            text: config.text,
            flow: config.flow,
        },
        warning,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CONFIDENCE_THRESHOLD;
    use fotolibro_vision::{MotifDetection, StubVision};

    fn analyses() -> Vec<PhotoAnalysis> {
        vec![PhotoAnalysis::fallback("a.jpg"), PhotoAnalysis::fallback("b.jpg")]
    }

    fn service(stub: StubVision) -> Arc<dyn VisionService> {
        Arc::new(stub)
    }

    #[tokio::test]
    async fn test_confident_detection_keeps_motif_and_config() {
        let stub = StubVision::new().with_motif(MotifDetection {
            primary_motif: "wedding".to_string(),
            confidence: 92,
            evidence: "vestido blanco, anillos".to_string(),
            secondary_motif: None,
            key_indicators: vec![],
        });
        let outcome = detect_motif(
            &service(stub),
            &analyses(),
            None,
            DEFAULT_CONFIDENCE_THRESHOLD,
        )
        .await;
        assert_eq!(outcome.profile.motif, Motif::Wedding);
        assert_eq!(outcome.profile.confidence, 92);
        assert_eq!(outcome.profile.design.template, "boda-clasica");
        assert!(outcome.warning.is_none());
    }

    #[tokio::test]
    async fn test_low_confidence_warns_but_keeps_reported_motif() {
        let stub = StubVision::new().with_motif(MotifDetection {
            primary_motif: "travel".to_string(),
            confidence: 45,
            evidence: String::new(),
            secondary_motif: None,
            key_indicators: vec![],
        });
        let outcome = detect_motif(
            &service(stub),
            &analyses(),
            None,
            DEFAULT_CONFIDENCE_THRESHOLD,
        )
        .await;
        // Low confidence is a warning, not a forced generic.
        assert_eq!(outcome.profile.motif, Motif::Travel);
        assert!(outcome.warning.as_deref().unwrap().contains("45"));
    }

    #[tokio::test]
    async fn test_failure_degrades_to_generic_with_zero_confidence() {
        let outcome = detect_motif(
            &service(StubVision::new().failing_motif()),
            &analyses(),
            Some("boda"),
            DEFAULT_CONFIDENCE_THRESHOLD,
        )
        .await;
        assert_eq!(outcome.profile.motif, Motif::Generic);
        assert_eq!(outcome.profile.confidence, 0);
        assert_eq!(outcome.profile.design.template, "clasico");
        assert!(outcome.warning.is_some());
        assert!(outcome.error.is_some());
    }
}
