//! End-to-end pipeline tests over the deterministic stub capability.

use std::collections::HashSet;
use std::sync::Arc;

use fotolibro_models::{ChronologyKind, ChronologyMetadata, Motif, PhotoAnalysis, TimelineSpan};
use fotolibro_pipeline::{Orchestrator, PipelineConfig, PipelineError, Submission};
use fotolibro_vision::{
    ChronologyScanResponse, MotifDetection, PatternDetection, PatternKind, PhotoSource, StubVision,
};

fn submission(names: &[&str]) -> Submission {
    Submission {
        photos: names
            .iter()
            .map(|n| PhotoSource::new(*n, "image/jpeg", Vec::new()))
            .collect(),
        client_name: "Maria".to_string(),
        client_email: "maria@example.com".to_string(),
        client_hint: None,
        custom_title: None,
        style_preference: None,
    }
}

fn orchestrator(stub: StubVision) -> Orchestrator {
    Orchestrator::new(Arc::new(stub), PipelineConfig::for_tests())
}

fn analysis(name: &str, event: &str) -> PhotoAnalysis {
    let mut a = PhotoAnalysis::fallback(name);
    a.narrative.event_type = event.to_string();
    a
}

#[tokio::test]
async fn test_happy_path_produces_complete_album_plan() {
    let names = ["a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg"];
    let output = orchestrator(StubVision::new())
        .run(submission(&names))
        .await
        .unwrap();

    assert_eq!(output.client_name, "Maria");
    assert_eq!(output.analyses.len(), 5);
    assert_eq!(output.ordered_photos.len(), 5);
    assert_eq!(output.story.photo_captions.len(), 5);
    assert!(output.errors.is_empty());
    assert!(output.warnings.is_empty());

    // Stub default motif is family at confidence 80, above threshold.
    assert_eq!(output.motif.motif, Motif::Family);
    assert_eq!(output.motif.confidence, 80);

    // No specialized pattern fires, so the order stays generic.
    assert_eq!(output.chronology.detected, ChronologyKind::Generic);
    assert_eq!(output.chronology.metadata, ChronologyMetadata::None);

    // Single-day scan plus five photos yields one chapter covering them all.
    assert_eq!(output.story.chapters.len(), 1);
    assert_eq!(output.story.chapters[0].title, "Un Dia Para Recordar");

    // One report per phase, in order, each timed.
    assert_eq!(output.phases.len(), 5);
    let phase_names: Vec<&str> = output.phases.iter().map(|p| p.phase.as_str()).collect();
    assert_eq!(
        phase_names,
        vec![
            "vision_analysis",
            "motif_detection",
            "chronology_arbitration",
            "story_building",
            "design_curation",
        ]
    );

    // Hero layout always includes the opening and closing photos.
    assert!(output.design.layout.hero_pages.contains(&0));
    assert!(output.design.layout.hero_pages.contains(&4));
}

#[tokio::test]
async fn test_travel_pattern_reorders_photos() {
    let stub = StubVision::new().with_pattern(
        PatternKind::Travel,
        PatternDetection {
            matched: true,
            confidence: 85,
            evidence: "changing landmarks across cities".to_string(),
            chronological_order: vec![2, 0, 1],
            weeks: None,
            route: Some(vec!["Madrid".to_string(), "Roma".to_string()]),
            phases: None,
        },
    );

    let output = orchestrator(stub)
        .run(submission(&["a.jpg", "b.jpg", "c.jpg"]))
        .await
        .unwrap();

    assert_eq!(output.chronology.detected, ChronologyKind::Travel);
    assert_eq!(output.chronology.confidence, 85);
    assert_eq!(
        output.chronology.metadata,
        ChronologyMetadata::Travel {
            route: vec!["Madrid".to_string(), "Roma".to_string()]
        }
    );
    let order: Vec<&str> = output
        .chronology
        .photos
        .iter()
        .map(|p| p.file_name.as_str())
        .collect();
    assert_eq!(order, vec!["c.jpg", "a.jpg", "b.jpg"]);

    // The stub's holistic scan keeps the arbiter order, so the final book
    // order matches the detector's.
    let final_order: Vec<&str> = output
        .ordered_photos
        .iter()
        .map(|p| p.file_name.as_str())
        .collect();
    assert_eq!(final_order, order);
}

#[tokio::test]
async fn test_empty_submission_is_fatal() {
    let err = orchestrator(StubVision::new())
        .run(submission(&[]))
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::EmptySubmission));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_all_photos_failing_is_fatal() {
    let stub = StubVision::new().failing_photo("a.jpg").failing_photo("b.jpg");
    let err = orchestrator(stub)
        .run(submission(&["a.jpg", "b.jpg"]))
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::VisionAnalysisFailed(_)));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_partial_photo_failure_recovers_with_fallback() {
    let stub = StubVision::new().failing_photo("b.jpg");
    let output = orchestrator(stub)
        .run(submission(&["a.jpg", "b.jpg", "c.jpg"]))
        .await
        .unwrap();

    assert_eq!(output.analyses.len(), 3);
    assert_eq!(output.analyses[1].file_name, "b.jpg");
    assert_eq!(output.errors.len(), 1);
    assert!(output.errors[0].contains("photo analysis"));
    assert_eq!(output.phases[0].errors_so_far, 1);
}

#[tokio::test]
async fn test_motif_failure_degrades_to_generic() {
    let output = orchestrator(StubVision::new().failing_motif())
        .run(submission(&["a.jpg", "b.jpg"]))
        .await
        .unwrap();

    assert_eq!(output.motif.motif, Motif::Generic);
    assert_eq!(output.motif.confidence, 0);
    assert!(output.errors.iter().any(|e| e.contains("motif detection")));
    // The run still completes with a full design.
    assert_eq!(output.phases.len(), 5);
}

#[tokio::test]
async fn test_low_confidence_motif_is_kept_with_warning() {
    let stub = StubVision::new().with_motif(MotifDetection {
        primary_motif: "wedding".to_string(),
        confidence: 45,
        evidence: "white dress in two photos".to_string(),
        secondary_motif: None,
        key_indicators: vec!["dress".to_string()],
    });
    let output = orchestrator(stub)
        .run(submission(&["a.jpg", "b.jpg"]))
        .await
        .unwrap();

    assert_eq!(output.motif.motif, Motif::Wedding);
    assert_eq!(output.motif.confidence, 45);
    assert_eq!(output.warnings.len(), 1);
    assert!(output.errors.is_empty());
}

#[tokio::test]
async fn test_narrative_failure_falls_back_to_suggested_captions() {
    let output = orchestrator(StubVision::new().failing_narrative())
        .run(submission(&["playa.jpg", "cena.jpg"]))
        .await
        .unwrap();

    // Fallback captions reuse each photo's suggested caption (the file stem
    // for neutral analyses), and the dedication is personalized.
    assert_eq!(output.story.photo_captions, vec!["playa", "cena"]);
    assert!(output.story.dedication.contains("Maria"));
    assert!(output
        .errors
        .iter()
        .any(|e| e.contains("story building")));
}

#[tokio::test]
async fn test_chronology_failure_keeps_arbiter_order() {
    let output = orchestrator(StubVision::new().failing_chronology())
        .run(submission(&["a.jpg", "b.jpg", "c.jpg"]))
        .await
        .unwrap();

    let final_order: Vec<&str> = output
        .ordered_photos
        .iter()
        .map(|p| p.file_name.as_str())
        .collect();
    assert_eq!(final_order, vec!["a.jpg", "b.jpg", "c.jpg"]);
    assert_eq!(output.story.chronology.confidence, 0);
    assert!(!output.errors.is_empty());
}

#[tokio::test]
async fn test_event_type_chapters_for_multi_day_album() {
    let stub = StubVision::new();
    let names: Vec<String> = (0..12).map(|i| format!("p{:02}.jpg", i)).collect();
    let mut stub = stub.with_chronology(fotolibro_vision::ChronologyScanResponse {
        timeline_type: fotolibro_models::TimelineSpan::Days,
        age_progression: false,
        age_details: String::new(),
        seasonal_flow: false,
        seasonal_details: String::new(),
        chronological_order: (0..12).collect(),
        narrative_arc: "a weekend trip".to_string(),
        confidence: 75,
    });
    for (i, name) in names.iter().enumerate() {
        let event = if i < 6 { "llegada" } else { "despedida" };
        stub = stub.with_analysis(name.clone(), analysis(name, event));
    }

    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let output = orchestrator(stub).run(submission(&name_refs)).await.unwrap();

    assert_eq!(output.story.chapters.len(), 2);
    assert_eq!(output.story.chapters[0].title, "Llegada");
    assert_eq!(output.story.chapters[1].title, "Despedida");
    output
        .story
        .validate_chapters(12)
        .expect("chapters must tile the photo range");
}

#[tokio::test]
async fn test_seeded_runs_are_deterministic() {
    let run_once = || async {
        orchestrator(StubVision::new())
            .run(submission(&["a.jpg", "b.jpg", "c.jpg"]))
            .await
            .unwrap()
    };
    let first = run_once().await;
    let second = run_once().await;

    assert_eq!(first.profile.suggested_title, second.profile.suggested_title);
    assert_eq!(
        first.design.typography.back_cover_text,
        second.design.typography.back_cover_text
    );
    assert_eq!(first.design.template.name, second.design.template.name);
}

#[tokio::test]
async fn test_layout_pages_do_not_overlap_hero_and_collage() {
    let names: Vec<String> = (0..9).map(|i| format!("p{}.jpg", i)).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let output = orchestrator(StubVision::new())
        .run(submission(&name_refs))
        .await
        .unwrap();

    let heroes: HashSet<usize> = output.design.layout.hero_pages.iter().copied().collect();
    let collages: HashSet<usize> = output.design.layout.collage_pages.iter().copied().collect();
    assert!(heroes.is_disjoint(&collages));
    for page in output.design.layout.breathing_pages.iter() {
        assert!(!heroes.contains(page));
        assert!(!collages.contains(page));
    }
}

#[tokio::test]
async fn test_arbiter_adopts_most_confident_detector() {
    // All three detectors match; only the strictly most confident proposal
    // (event, 80) may reorder the album.
    let stub = StubVision::new()
        .with_pattern(
            PatternKind::Pregnancy,
            PatternDetection {
                matched: true,
                confidence: 65,
                evidence: "growing belly".to_string(),
                chronological_order: vec![0, 1, 2, 3, 4, 5],
                weeks: Some(vec![10, 16, 22, 28, 34, 39]),
                route: None,
                phases: None,
            },
        )
        .with_pattern(
            PatternKind::Travel,
            PatternDetection {
                matched: true,
                confidence: 72,
                evidence: "two cities".to_string(),
                chronological_order: vec![1, 0, 2, 3, 4, 5],
                weeks: None,
                route: Some(vec!["Paris".to_string(), "Lyon".to_string()]),
                phases: None,
            },
        )
        .with_pattern(
            PatternKind::Event,
            PatternDetection {
                matched: true,
                confidence: 80,
                evidence: "one wedding day".to_string(),
                chronological_order: vec![5, 4, 3, 2, 1, 0],
                weeks: None,
                route: None,
                phases: Some(vec![
                    "preparativos".to_string(),
                    "ceremonia".to_string(),
                    "fiesta".to_string(),
                ]),
            },
        );

    let names = ["a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg", "f.jpg"];
    let output = orchestrator(stub).run(submission(&names)).await.unwrap();

    assert_eq!(output.chronology.detected, ChronologyKind::Event);
    assert_eq!(output.chronology.confidence, 80);
    assert_eq!(
        output.chronology.metadata,
        ChronologyMetadata::Event {
            phases: vec![
                "preparativos".to_string(),
                "ceremonia".to_string(),
                "fiesta".to_string(),
            ]
        }
    );
    let order: Vec<&str> = output
        .ordered_photos
        .iter()
        .map(|p| p.file_name.as_str())
        .collect();
    assert_eq!(order, vec!["f.jpg", "e.jpg", "d.jpg", "c.jpg", "b.jpg", "a.jpg"]);
}

#[tokio::test]
async fn test_years_album_splits_into_three_chapters() {
    let names: Vec<String> = (0..23).map(|i| format!("p{:02}.jpg", i)).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();

    let stub = StubVision::new().with_chronology(ChronologyScanResponse {
        timeline_type: TimelineSpan::Years,
        age_progression: true,
        age_details: "from toddler to teenager".to_string(),
        seasonal_flow: false,
        seasonal_details: String::new(),
        chronological_order: (0..23).collect(),
        narrative_arc: "growing up".to_string(),
        confidence: 75,
    });

    let output = orchestrator(stub)
        .run(submission(&name_refs))
        .await
        .unwrap();

    let titles: Vec<&str> = output
        .story
        .chapters
        .iter()
        .map(|c| c.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["Los Primeros Pasos", "Creciendo Juntos", "Hasta Hoy"]
    );
    let sizes: Vec<usize> = output
        .story
        .chapters
        .iter()
        .map(|c| c.photo_count())
        .collect();
    assert_eq!(sizes, vec![8, 8, 7]);
    assert_eq!(output.story.photo_captions.len(), 23);
    assert!(output.story.validate_chapters(23).is_ok());
}
