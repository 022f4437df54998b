//! Deterministic stub capability for tests.
//!
//! `StubVision` satisfies [`VisionService`] with fixture data so the whole
//! pipeline can run without network access. Scenarios are steered with the
//! builder methods: inject fixtures per request shape, or force individual
//! shapes to fail to exercise fallback paths.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use fotolibro_models::{PhotoAnalysis, TimelineSpan};

use crate::error::{VisionError, VisionResult};
use crate::service::{
    ChronologyScanResponse, MotifDetection, NarrativeContext, NarrativeTexts, PatternDetection,
    PatternKind, PhotoSource, VisionService,
};

/// Fixture-driven [`VisionService`] implementation.
#[derive(Debug, Default)]
pub struct StubVision {
    analyses: HashMap<String, PhotoAnalysis>,
    fail_photos: HashSet<String>,
    motif: Option<MotifDetection>,
    fail_motif: bool,
    patterns: HashMap<PatternKind, PatternDetection>,
    chronology: Option<ChronologyScanResponse>,
    fail_chronology: bool,
    narrative: Option<NarrativeTexts>,
    fail_narrative: bool,
}

impl StubVision {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the analysis returned for one photo.
    pub fn with_analysis(mut self, file_name: impl Into<String>, analysis: PhotoAnalysis) -> Self {
        self.analyses.insert(file_name.into(), analysis);
        self
    }

    /// Make `analyze_photo` fail for one photo.
    pub fn failing_photo(mut self, file_name: impl Into<String>) -> Self {
        self.fail_photos.insert(file_name.into());
        self
    }

    /// Fix the motif detection result.
    pub fn with_motif(mut self, detection: MotifDetection) -> Self {
        self.motif = Some(detection);
        self
    }

    /// Make motif detection fail.
    pub fn failing_motif(mut self) -> Self {
        self.fail_motif = true;
        self
    }

    /// Fix one specialized pattern detection result. Patterns without a
    /// fixture report no match.
    pub fn with_pattern(mut self, kind: PatternKind, detection: PatternDetection) -> Self {
        self.patterns.insert(kind, detection);
        self
    }

    /// Fix the holistic chronology scan result.
    pub fn with_chronology(mut self, scan: ChronologyScanResponse) -> Self {
        self.chronology = Some(scan);
        self
    }

    /// Make the holistic chronology scan fail.
    pub fn failing_chronology(mut self) -> Self {
        self.fail_chronology = true;
        self
    }

    /// Fix the narrative text result.
    pub fn with_narrative(mut self, texts: NarrativeTexts) -> Self {
        self.narrative = Some(texts);
        self
    }

    /// Make narrative text generation fail.
    pub fn failing_narrative(mut self) -> Self {
        self.fail_narrative = true;
        self
    }
}

#[async_trait]
impl VisionService for StubVision {
    async fn analyze_photo(
        &self,
        photo: &PhotoSource,
        _context_summary: Option<&str>,
    ) -> VisionResult<PhotoAnalysis> {
        if self.fail_photos.contains(&photo.file_name) {
            return Err(VisionError::request(format!(
                "stub failure for {}",
                photo.file_name
            )));
        }
        if let Some(analysis) = self.analyses.get(&photo.file_name) {
            return Ok(analysis.clone());
        }
        // Unconfigured photos get a neutral but valid analysis.
        Ok(PhotoAnalysis::fallback(&photo.file_name))
    }

    async fn detect_motif(
        &self,
        _summaries: &[String],
        _client_hint: Option<&str>,
    ) -> VisionResult<MotifDetection> {
        if self.fail_motif {
            return Err(VisionError::request("stub motif failure"));
        }
        let detection = self.motif.clone().unwrap_or(MotifDetection {
            primary_motif: "family".to_string(),
            confidence: 80,
            evidence: "stub fixture".to_string(),
            secondary_motif: None,
            key_indicators: Vec::new(),
        });
        detection.motif()?;
        Ok(detection)
    }

    async fn detect_pattern(
        &self,
        kind: PatternKind,
        summaries: &[String],
    ) -> VisionResult<PatternDetection> {
        let detection = self
            .patterns
            .get(&kind)
            .cloned()
            .unwrap_or_else(PatternDetection::no_match);
        detection.validate(summaries.len())?;
        Ok(detection)
    }

    async fn detect_chronology(
        &self,
        summaries: &[String],
    ) -> VisionResult<ChronologyScanResponse> {
        if self.fail_chronology {
            return Err(VisionError::request("stub chronology failure"));
        }
        let scan = self.chronology.clone().unwrap_or(ChronologyScanResponse {
            timeline_type: TimelineSpan::SingleDay,
            age_progression: false,
            age_details: String::new(),
            seasonal_flow: false,
            seasonal_details: String::new(),
            chronological_order: (0..summaries.len()).collect(),
            narrative_arc: "stub fixture".to_string(),
            confidence: 60,
        });
        scan.validate(summaries.len())?;
        Ok(scan)
    }

    async fn generate_narrative(
        &self,
        ordered_summaries: &[String],
        context: &NarrativeContext,
    ) -> VisionResult<NarrativeTexts> {
        if self.fail_narrative {
            return Err(VisionError::request("stub narrative failure"));
        }
        let texts = self.narrative.clone().unwrap_or_else(|| NarrativeTexts {
            cover_title: format!("Recuerdos de {}", context.client_name),
            cover_subtitle: "Una historia en imagenes".to_string(),
            dedication: format!("Para {}, con carino.", context.client_name),
            photo_captions: (1..=ordered_summaries.len())
                .map(|i| format!("Momento {}", i))
                .collect(),
            back_cover_text: "Hecho con amor".to_string(),
            epilogue: None,
        });
        texts.validate(ordered_summaries.len())?;
        Ok(texts)
    }
}
