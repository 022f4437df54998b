//! Top-level pipeline output and execution metadata.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    AlbumProfile, ChronologyResult, DesignDecisions, EventMotifProfile, PhotoAnalysis,
    PhotobookStory,
};

/// The five pipeline phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    VisionAnalysis,
    MotifDetection,
    ChronologyArbitration,
    StoryBuilding,
    DesignCuration,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VisionAnalysis => "vision_analysis",
            Self::MotifDetection => "motif_detection",
            Self::ChronologyArbitration => "chronology_arbitration",
            Self::StoryBuilding => "story_building",
            Self::DesignCuration => "design_curation",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timing and issue summary for one completed phase.
///
/// Suitable for driving a progress indicator: phase name, elapsed time, and
/// the warnings/errors recorded up to the end of that phase.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PhaseReport {
    pub phase: Phase,

    /// Wall-clock time the phase took, in milliseconds
    pub elapsed_ms: u64,

    /// Warnings recorded so far (cumulative count)
    pub warnings_so_far: usize,

    /// Recovered errors recorded so far (cumulative count)
    pub errors_so_far: usize,
}

/// Combined result of one pipeline run for a client submission.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PipelineOutput {
    /// Unique id for this submission run
    pub submission_id: Uuid,

    /// Client the book is for
    pub client_name: String,

    /// Per-photo analyses, in original input order
    pub analyses: Vec<PhotoAnalysis>,

    /// Album-level aggregate profile
    pub profile: AlbumProfile,

    /// Detected life-event motif and its configuration
    pub motif: EventMotifProfile,

    /// Chronology-arbitration decision (specialized-detector stage)
    pub chronology: ChronologyResult,

    /// Photos in the final book order, after the story builder's holistic
    /// refinement; layout indices and captions align with this sequence
    pub ordered_photos: Vec<PhotoAnalysis>,

    /// Generated narrative
    pub story: PhotobookStory,

    /// Concrete design decisions
    pub design: DesignDecisions,

    /// Total wall-clock time for the whole run, in milliseconds
    pub total_elapsed_ms: u64,

    /// Per-phase timing reports, in execution order
    pub phases: Vec<PhaseReport>,

    /// Recoverable errors accumulated across phases (operational telemetry)
    pub errors: Vec<String>,

    /// Warnings accumulated across phases (e.g. low motif confidence)
    pub warnings: Vec<String>,

    /// When the run completed
    pub completed_at: DateTime<Utc>,
}
