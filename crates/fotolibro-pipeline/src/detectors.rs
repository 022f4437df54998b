//! Specialized chronology detectors and their arbiter.
//!
//! Three independent classifiers (pregnancy progression, travel route,
//! single-event phases) each get one shot at proposing a chronological
//! re-ordering. They have no data dependency on each other and run
//! concurrently; the arbiter keeps the strictly most confident proposal, falling back
//! to the original photo order when none reaches the threshold.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use fotolibro_models::{
    apply_order, ChronologyKind, ChronologyMetadata, ChronologyResult, PhotoAnalysis,
};
use fotolibro_vision::{PatternDetection, PatternKind, VisionService};

/// Stable arbiter preference order; first-listed wins confidence ties.
const DETECTOR_ORDER: [PatternKind; 3] =
    [PatternKind::Pregnancy, PatternKind::Travel, PatternKind::Event];

/// Run one specialized detector. Internal failures (including contract
/// violations in the response) degrade to a non-match; this never errors,
/// but the failure text is kept for the orchestrator's telemetry.
async fn run_detector(
    service: &Arc<dyn VisionService>,
    kind: PatternKind,
    summaries: &[String],
) -> (PatternDetection, Option<String>) {
    match service.detect_pattern(kind, summaries).await {
        Ok(detection) => {
            info!(
                detector = kind.as_str(),
                matched = detection.matched,
                confidence = detection.confidence,
                "Pattern detector finished"
            );
            (detection, None)
        }
        Err(e) => {
            warn!(detector = kind.as_str(), error = %e, "Pattern detector failed");
            (
                PatternDetection::no_match(),
                Some(format!("{} detector: {}", kind.as_str(), e)),
            )
        }
    }
}

fn metadata_for(kind: PatternKind, detection: &PatternDetection) -> ChronologyMetadata {
    match kind {
        PatternKind::Pregnancy => ChronologyMetadata::Pregnancy {
            weeks: detection.weeks.clone().unwrap_or_default(),
        },
        PatternKind::Travel => ChronologyMetadata::Travel {
            route: detection.route.clone().unwrap_or_default(),
        },
        PatternKind::Event => ChronologyMetadata::Event {
            phases: detection.phases.clone().unwrap_or_default(),
        },
    }
}

fn kind_for(kind: PatternKind) -> ChronologyKind {
    match kind {
        PatternKind::Pregnancy => ChronologyKind::Pregnancy,
        PatternKind::Travel => ChronologyKind::Travel,
        PatternKind::Event => ChronologyKind::Event,
    }
}

/// Run all three detectors concurrently and arbitrate.
///
/// The winner needs a match with strictly the highest confidence at or above
/// `confidence_threshold`; ties resolve toward the preference order
/// pregnancy > travel > event. With no qualifying detector the photos keep
/// their original, untouched order.
pub async fn detect_and_order(
    service: &Arc<dyn VisionService>,
    photos: &[PhotoAnalysis],
    confidence_threshold: u8,
) -> (ChronologyResult, Vec<String>) {
    let summaries: Vec<String> = photos.iter().map(|p| p.summary()).collect();

    let outcomes = join_all(
        DETECTOR_ORDER
            .iter()
            .map(|&kind| run_detector(service, kind, &summaries)),
    )
    .await;

    let errors: Vec<String> = outcomes.iter().filter_map(|(_, e)| e.clone()).collect();
    let detections: Vec<&PatternDetection> = outcomes.iter().map(|(d, _)| d).collect();

    let mut winner: Option<(PatternKind, &PatternDetection)> = None;
    for (kind, detection) in DETECTOR_ORDER.iter().zip(detections.iter().copied()) {
        if !detection.matched || detection.confidence < confidence_threshold {
            continue;
        }
        // Strictly-greater keeps the first-listed detector on ties.
        if winner.is_none_or(|(_, best)| detection.confidence > best.confidence) {
            winner = Some((*kind, detection));
        }
    }

    let result = match winner {
        Some((kind, detection)) => {
            match apply_order(photos, &detection.chronological_order) {
                Some(ordered) => {
                    info!(
                        detector = kind.as_str(),
                        confidence = detection.confidence,
                        "Arbiter adopted specialized ordering"
                    );
                    ChronologyResult {
                        detected: kind_for(kind),
                        confidence: detection.confidence,
                        photos: ordered,
                        metadata: metadata_for(kind, detection),
                    }
                }
                None => {
                    // Order no longer a permutation: contract violation,
                    // fall back to the original order.
                    warn!(
                        detector = kind.as_str(),
                        "Winning detector order is not a permutation, keeping original order"
                    );
                    generic_result(photos)
                }
            }
        }
        None => {
            info!("No specialized detector reached threshold, keeping original order");
            generic_result(photos)
        }
    };

    (result, errors)
}

fn generic_result(photos: &[PhotoAnalysis]) -> ChronologyResult {
    ChronologyResult {
        detected: ChronologyKind::Generic,
        confidence: 0,
        photos: photos.to_vec(),
        metadata: ChronologyMetadata::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CONFIDENCE_THRESHOLD;
    use fotolibro_vision::StubVision;

    fn photos(n: usize) -> Vec<PhotoAnalysis> {
        (0..n)
            .map(|i| PhotoAnalysis::fallback(format!("p{}.jpg", i)))
            .collect()
    }

    fn detection(confidence: u8, order: Vec<usize>) -> PatternDetection {
        PatternDetection {
            matched: true,
            confidence,
            evidence: String::new(),
            chronological_order: order,
            weeks: None,
            route: None,
            phases: None,
        }
    }

    fn names(result: &ChronologyResult) -> Vec<&str> {
        result.photos.iter().map(|p| p.file_name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_highest_confidence_detector_wins() {
        let stub = StubVision::new()
            .with_pattern(PatternKind::Pregnancy, detection(65, vec![0, 1, 2]))
            .with_pattern(PatternKind::Travel, detection(72, vec![1, 0, 2]))
            .with_pattern(PatternKind::Event, detection(80, vec![2, 1, 0]));
        let service: Arc<dyn VisionService> = Arc::new(stub);

        let (result, _) =
            detect_and_order(&service, &photos(3), DEFAULT_CONFIDENCE_THRESHOLD).await;
        assert_eq!(result.detected, ChronologyKind::Event);
        assert_eq!(result.confidence, 80);
        assert_eq!(names(&result), vec!["p2.jpg", "p1.jpg", "p0.jpg"]);
        assert_eq!(result.metadata, ChronologyMetadata::Event { phases: vec![] });
    }

    #[tokio::test]
    async fn test_all_below_threshold_keeps_original_order() {
        let stub = StubVision::new()
            .with_pattern(PatternKind::Pregnancy, detection(69, vec![1, 0]))
            .with_pattern(PatternKind::Travel, detection(50, vec![1, 0]));
        let service: Arc<dyn VisionService> = Arc::new(stub);

        let (result, _) =
            detect_and_order(&service, &photos(2), DEFAULT_CONFIDENCE_THRESHOLD).await;
        assert_eq!(result.detected, ChronologyKind::Generic);
        assert_eq!(result.confidence, 0);
        assert_eq!(names(&result), vec!["p0.jpg", "p1.jpg"]);
        assert_eq!(result.metadata, ChronologyMetadata::None);
    }

    #[tokio::test]
    async fn test_tie_prefers_pregnancy_over_travel() {
        let stub = StubVision::new()
            .with_pattern(PatternKind::Pregnancy, detection(85, vec![1, 0]))
            .with_pattern(PatternKind::Travel, detection(85, vec![0, 1]));
        let service: Arc<dyn VisionService> = Arc::new(stub);

        let (result, _) =
            detect_and_order(&service, &photos(2), DEFAULT_CONFIDENCE_THRESHOLD).await;
        assert_eq!(result.detected, ChronologyKind::Pregnancy);
        assert_eq!(names(&result), vec!["p1.jpg", "p0.jpg"]);
    }

    #[tokio::test]
    async fn test_winner_carries_its_metadata() {
        let mut travel = detection(90, vec![1, 0]);
        travel.route = Some(vec!["Madrid".to_string(), "Lisboa".to_string()]);
        let stub = StubVision::new().with_pattern(PatternKind::Travel, travel);
        let service: Arc<dyn VisionService> = Arc::new(stub);

        let (result, _) =
            detect_and_order(&service, &photos(2), DEFAULT_CONFIDENCE_THRESHOLD).await;
        assert_eq!(result.detected, ChronologyKind::Travel);
        assert_eq!(
            result.metadata,
            ChronologyMetadata::Travel {
                route: vec!["Madrid".to_string(), "Lisboa".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn test_output_is_always_a_permutation_of_input() {
        let stub = StubVision::new()
            .with_pattern(PatternKind::Event, detection(95, vec![3, 1, 0, 2]));
        let service: Arc<dyn VisionService> = Arc::new(stub);

        let input = photos(4);
        let (result, _) = detect_and_order(&service, &input, DEFAULT_CONFIDENCE_THRESHOLD).await;
        let mut sorted: Vec<_> = names(&result);
        sorted.sort_unstable();
        let mut expected: Vec<_> = input.iter().map(|p| p.file_name.as_str()).collect();
        expected.sort_unstable();
        assert_eq!(sorted, expected);
    }
}
