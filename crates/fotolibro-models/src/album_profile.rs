//! Album-level aggregate statistics.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Overall storytelling shape of the album.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeArc {
    /// Photos already follow a temporal progression
    #[default]
    Chronological,
    /// Several distinct emotions; the album is an emotional journey
    EmotionalJourney,
    /// Grouped by theme rather than time or feeling
    Thematic,
}

impl NarrativeArc {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chronological => "chronological",
            Self::EmotionalJourney => "emotional-journey",
            Self::Thematic => "thematic",
        }
    }
}

/// Album-level profile derived from the full set of per-photo analyses.
///
/// Computed once after vision analysis completes; read-only afterward.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AlbumProfile {
    /// Most frequent primary emotion across photos
    pub dominant_emotion: String,

    /// Most frequent per-photo event-type guess
    pub dominant_event: String,

    /// Arithmetic mean of composition quality (1.0-10.0)
    pub average_quality: f64,

    /// Recommended template style for the album
    pub recommended_style: String,

    /// Suggested album title
    pub suggested_title: String,

    /// Narrative-arc classification
    pub narrative_arc: NarrativeArc,
}
