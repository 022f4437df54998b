//! The external vision/reasoning capability boundary.
//!
//! Every AI call the pipeline makes goes through the [`VisionService`]
//! trait: one method per request shape. Production uses [`crate::GeminiVision`];
//! tests use [`crate::StubVision`] with deterministic fixtures so the whole
//! pipeline runs without network access.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use fotolibro_models::{is_permutation, Motif, PhotoAnalysis, TimelineSpan};

use crate::error::{VisionError, VisionResult};

/// One photo handed to the vision capability.
#[derive(Debug, Clone)]
pub struct PhotoSource {
    /// File path or name identifying the photo
    pub file_name: String,

    /// MIME type ("image/jpeg", ...)
    pub mime_type: String,

    /// Raw image bytes
    pub data: Vec<u8>,
}

impl PhotoSource {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// Which specialized chronology pattern a detection call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Pregnancy,
    Travel,
    Event,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pregnancy => "pregnancy",
            Self::Travel => "travel",
            Self::Event => "event",
        }
    }
}

/// Raw motif classification from the capability.
///
/// `primary_motif` is free text on the wire; [`MotifDetection::motif`]
/// validates it against the closed motif set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotifDetection {
    pub primary_motif: String,

    /// Confidence (0-100)
    pub confidence: u8,

    /// Free-text evidence for the classification
    #[serde(default)]
    pub evidence: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_motif: Option<String>,

    #[serde(default)]
    pub key_indicators: Vec<String>,
}

impl MotifDetection {
    /// Validate the reported motif against the closed set.
    pub fn motif(&self) -> VisionResult<Motif> {
        Motif::parse(&self.primary_motif).ok_or_else(|| {
            VisionError::contract(format!("motif '{}' is not in the closed set", self.primary_motif))
        })
    }
}

/// Result of one specialized pattern-detection call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternDetection {
    /// Whether the pattern was detected at all
    pub matched: bool,

    /// Confidence (0-100)
    pub confidence: u8,

    /// Free-text evidence
    #[serde(default)]
    pub evidence: String,

    /// Proposed chronological order as input indices (permutation)
    #[serde(default)]
    pub chronological_order: Vec<usize>,

    /// Pregnancy only: estimated week per ordered photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks: Option<Vec<u32>>,

    /// Travel only: locations in route order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<Vec<String>>,

    /// Event only: detected event phases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<String>>,
}

impl PatternDetection {
    /// A non-match with zero confidence, used by detector-internal fallback.
    pub fn no_match() -> Self {
        Self {
            matched: false,
            confidence: 0,
            evidence: String::new(),
            chronological_order: Vec::new(),
            weeks: None,
            route: None,
            phases: None,
        }
    }

    /// Enforce the permutation contract when the detector claims a match.
    pub fn validate(&self, photo_count: usize) -> VisionResult<()> {
        if self.matched && !is_permutation(&self.chronological_order, photo_count) {
            return Err(VisionError::contract(format!(
                "chronological_order is not a permutation of 0..{}",
                photo_count
            )));
        }
        Ok(())
    }
}

/// Raw holistic chronology scan from the capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChronologyScanResponse {
    pub timeline_type: TimelineSpan,

    pub age_progression: bool,

    #[serde(default)]
    pub age_details: String,

    pub seasonal_flow: bool,

    #[serde(default)]
    pub seasonal_details: String,

    /// Proposed chronological order as input indices (permutation)
    pub chronological_order: Vec<usize>,

    #[serde(default)]
    pub narrative_arc: String,

    /// Confidence (0-100)
    pub confidence: u8,
}

impl ChronologyScanResponse {
    /// Enforce the permutation contract.
    pub fn validate(&self, photo_count: usize) -> VisionResult<()> {
        if !is_permutation(&self.chronological_order, photo_count) {
            return Err(VisionError::contract(format!(
                "chronological_order is not a permutation of 0..{}",
                photo_count
            )));
        }
        Ok(())
    }
}

/// Context handed to narrative text generation.
#[derive(Debug, Clone, Default)]
pub struct NarrativeContext {
    pub client_name: String,
    pub motif: Motif,
    pub dominant_emotion: String,
    pub timeline: TimelineSpan,
    pub custom_title: Option<String>,
}

/// Generated narrative texts for the whole book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeTexts {
    /// Short cover title (2-5 words)
    pub cover_title: String,

    pub cover_subtitle: String,

    /// 2-3 sentence dedication
    pub dedication: String,

    /// Exactly one caption per ordered photo
    pub photo_captions: Vec<String>,

    pub back_cover_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epilogue: Option<String>,
}

impl NarrativeTexts {
    /// Enforce the caption-count contract.
    pub fn validate(&self, photo_count: usize) -> VisionResult<()> {
        if self.photo_captions.len() != photo_count {
            return Err(VisionError::contract(format!(
                "expected {} captions, got {}",
                photo_count,
                self.photo_captions.len()
            )));
        }
        Ok(())
    }
}

/// The five request shapes of the external vision/reasoning capability.
///
/// All calls are blocking request/response: the caller suspends until a
/// full structured response (or error) returns. No retries happen at this
/// boundary; each failure is converted exactly once into the calling
/// phase's fallback.
#[async_trait]
pub trait VisionService: Send + Sync {
    /// Analyze one photo. `context_summary` carries a compact summary of
    /// prior analyses in the same album, for narrative coherence only.
    async fn analyze_photo(
        &self,
        photo: &PhotoSource,
        context_summary: Option<&str>,
    ) -> VisionResult<PhotoAnalysis>;

    /// Classify the whole album into a life-event motif.
    async fn detect_motif(
        &self,
        summaries: &[String],
        client_hint: Option<&str>,
    ) -> VisionResult<MotifDetection>;

    /// Run one specialized chronology-pattern detection.
    async fn detect_pattern(
        &self,
        kind: PatternKind,
        summaries: &[String],
    ) -> VisionResult<PatternDetection>;

    /// Holistic timeline classification over the whole photo set.
    async fn detect_chronology(
        &self,
        summaries: &[String],
    ) -> VisionResult<ChronologyScanResponse>;

    /// Generate all narrative texts for the ordered photo set.
    async fn generate_narrative(
        &self,
        ordered_summaries: &[String],
        context: &NarrativeContext,
    ) -> VisionResult<NarrativeTexts>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motif_detection_validates_closed_set() {
        let det = MotifDetection {
            primary_motif: "wedding".to_string(),
            confidence: 90,
            evidence: String::new(),
            secondary_motif: None,
            key_indicators: vec![],
        };
        assert_eq!(det.motif().unwrap(), Motif::Wedding);

        let bad = MotifDetection {
            primary_motif: "quinceanera".to_string(),
            ..det
        };
        assert!(matches!(bad.motif(), Err(VisionError::Contract(_))));
    }

    #[test]
    fn test_pattern_detection_permutation_contract() {
        let mut det = PatternDetection::no_match();
        det.matched = true;
        det.confidence = 85;
        det.chronological_order = vec![1, 0, 2];
        assert!(det.validate(3).is_ok());

        det.chronological_order = vec![1, 1, 2];
        assert!(det.validate(3).is_err());

        // Non-matches carry no order and pass validation.
        assert!(PatternDetection::no_match().validate(3).is_ok());
    }

    #[test]
    fn test_narrative_caption_count_contract() {
        let texts = NarrativeTexts {
            cover_title: "Nuestra Boda".to_string(),
            cover_subtitle: String::new(),
            dedication: String::new(),
            photo_captions: vec![String::new(); 4],
            back_cover_text: String::new(),
            epilogue: None,
        };
        assert!(texts.validate(4).is_ok());
        assert!(texts.validate(5).is_err());
    }
}
