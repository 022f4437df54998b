//! Five-phase pipeline orchestration.
//!
//! Runs vision analysis, motif detection, chronology arbitration, story
//! building, and design curation in fixed order, each feeding the next.
//! Phases 2-4 recover from failure by substituting their designed fallback
//! and recording the error; phase 1 (nothing analyzable) and phase 5 (pure
//! function, so a failure is a defect) abort the submission.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use uuid::Uuid;

use fotolibro_models::{Phase, PhaseReport, PipelineOutput};
use fotolibro_vision::{PhotoAnalyzer, PhotoSource, VisionService};

use crate::aggregator;
use crate::config::PipelineConfig;
use crate::curator::{curate, CuratorInput};
use crate::detectors;
use crate::error::{PipelineError, PipelineResult};
use crate::logging::SubmissionLogger;
use crate::motif::detect_motif;
use crate::story::{build_story, StoryInput};

/// One customer submission: photos plus client metadata.
#[derive(Debug, Clone)]
pub struct Submission {
    pub photos: Vec<PhotoSource>,
    pub client_name: String,
    pub client_email: String,

    /// Free-text occasion hint supplied by the customer
    pub client_hint: Option<String>,

    /// Customer-chosen album title, if any
    pub custom_title: Option<String>,

    /// Customer style preference, matched against template names
    pub style_preference: Option<String>,
}

/// Pipeline entry point used by the storefront layer.
pub struct Orchestrator {
    service: Arc<dyn VisionService>,
    config: PipelineConfig,
}

impl Orchestrator {
    pub fn new(service: Arc<dyn VisionService>, config: PipelineConfig) -> Self {
        Self { service, config }
    }

    /// Run the full pipeline for one submission.
    pub async fn run(&self, submission: Submission) -> PipelineResult<PipelineOutput> {
        if submission.photos.is_empty() {
            return Err(PipelineError::EmptySubmission);
        }

        let submission_id = Uuid::new_v4();
        let logger = SubmissionLogger::new(&submission_id, &submission.client_name);

        info!(
            submission_id = %submission_id,
            photos = submission.photos.len(),
            email = %submission.client_email,
            "Pipeline run started"
        );

        let mut rng = match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let total_timer = Instant::now();
        let mut phases: Vec<PhaseReport> = Vec::with_capacity(5);
        let mut errors: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        // Phase 1: vision analysis (fatal when nothing is analyzable).
        logger.phase_start(Phase::VisionAnalysis.as_str());
        let timer = Instant::now();
        let analyzer =
            PhotoAnalyzer::new(Arc::clone(&self.service)).with_pause(self.config.photo_pause);
        let album = analyzer.analyze_album(&submission.photos).await;
        if album.failures.len() == submission.photos.len() {
            return Err(PipelineError::VisionAnalysisFailed(format!(
                "all {} photo analyses failed",
                submission.photos.len()
            )));
        }
        for failure in &album.failures {
            errors.push(format!("photo analysis: {}", failure));
        }
        let profile = aggregator::aggregate(
            &album.analyses,
            Some(&submission.client_name),
            &mut rng,
        )?;
        record_phase(&logger, &mut phases, Phase::VisionAnalysis, timer, &warnings, &errors);

        // Phase 2: motif detection (degrades to generic).
        logger.phase_start(Phase::MotifDetection.as_str());
        let timer = Instant::now();
        let motif_outcome = detect_motif(
            &self.service,
            &album.analyses,
            submission.client_hint.as_deref(),
            self.config.confidence_threshold,
        )
        .await;
        if let Some(error) = &motif_outcome.error {
            logger.recovered(Phase::MotifDetection.as_str(), error);
            errors.push(format!("motif detection: {}", error));
        }
        if let Some(warning) = &motif_outcome.warning {
            logger.warning(Phase::MotifDetection.as_str(), warning);
            warnings.push(warning.clone());
        }
        record_phase(&logger, &mut phases, Phase::MotifDetection, timer, &warnings, &errors);

        // Phase 3: chronology arbitration (degrades to original order).
        logger.phase_start(Phase::ChronologyArbitration.as_str());
        let timer = Instant::now();
        let (chronology, detector_errors) = detectors::detect_and_order(
            &self.service,
            &album.analyses,
            self.config.confidence_threshold,
        )
        .await;
        for error in detector_errors {
            logger.recovered(Phase::ChronologyArbitration.as_str(), &error);
            errors.push(error);
        }
        record_phase(
            &logger,
            &mut phases,
            Phase::ChronologyArbitration,
            timer,
            &warnings,
            &errors,
        );

        // Phase 4: story building (both sub-phases degrade).
        logger.phase_start(Phase::StoryBuilding.as_str());
        let timer = Instant::now();
        let story_outcome = build_story(
            &self.service,
            StoryInput {
                photos: &chronology.photos,
                profile: &profile,
                motif: &motif_outcome.profile,
                client_name: &submission.client_name,
                custom_title: submission.custom_title.as_deref(),
            },
        )
        .await;
        for error in &story_outcome.errors {
            logger.recovered(Phase::StoryBuilding.as_str(), error);
            errors.push(format!("story building: {}", error));
        }
        record_phase(&logger, &mut phases, Phase::StoryBuilding, timer, &warnings, &errors);

        // Phase 5: design curation (pure; failure is fatal).
        logger.phase_start(Phase::DesignCuration.as_str());
        let timer = Instant::now();
        let design = curate(
            CuratorInput {
                photos: &story_outcome.ordered_photos,
                profile: &profile,
                motif: &motif_outcome.profile,
                story: &story_outcome.story,
                style_preference: submission.style_preference.as_deref(),
            },
            &mut rng,
        )?;
        record_phase(&logger, &mut phases, Phase::DesignCuration, timer, &warnings, &errors);

        let total_elapsed_ms = total_timer.elapsed().as_millis() as u64;
        info!(
            submission_id = %submission_id,
            elapsed_ms = total_elapsed_ms,
            errors = errors.len(),
            warnings = warnings.len(),
            "Pipeline run completed"
        );

        Ok(PipelineOutput {
            submission_id,
            client_name: submission.client_name,
            analyses: album.analyses,
            profile,
            motif: motif_outcome.profile,
            chronology,
            ordered_photos: story_outcome.ordered_photos,
            story: story_outcome.story,
            design,
            total_elapsed_ms,
            phases,
            errors,
            warnings,
            completed_at: Utc::now(),
        })
    }
}

fn record_phase(
    logger: &SubmissionLogger,
    phases: &mut Vec<PhaseReport>,
    phase: Phase,
    timer: Instant,
    warnings: &[String],
    errors: &[String],
) {
    let elapsed_ms = timer.elapsed().as_millis() as u64;
    logger.phase_done(phase.as_str(), elapsed_ms);
    phases.push(PhaseReport {
        phase,
        elapsed_ms,
        warnings_so_far: warnings.len(),
        errors_so_far: errors.len(),
    });
}
