//! Shared data models for the Fotolibro curation pipeline.
//!
//! Every pipeline phase exchanges the types defined here: per-photo vision
//! analyses, the album profile, the detected motif with its static
//! configuration, chronology results, the generated story, and the final
//! design decisions.

mod album_profile;
mod chronology;
mod design;
mod motif;
mod output;
mod photo_analysis;
mod story;

pub use album_profile::{AlbumProfile, NarrativeArc};
pub use chronology::{
    apply_order, is_permutation, ChronologyKind, ChronologyMetadata, ChronologyResult,
    ChronologyScan, TimelineSpan,
};
pub use design::{
    ColorScheme, Decorations, DesignDecisions, LayoutStrategy, QualityTargets, TemplateChoice,
    Typography,
};
pub use motif::{EventMotifProfile, Motif, MotifDesign, MotifText, NarrativeFlow};
pub use output::{Phase, PhaseReport, PipelineOutput};
pub use photo_analysis::{
    ColorPalette, CompositionAnalysis, ContentAnalysis, DesignHints, EmotionAnalysis, MainSubject,
    NarrativeHints, Orientation, PhotoAnalysis, Placement, Setting, NEUTRAL_SCORE,
    NEUTRAL_SEQUENCE_HINT,
};
pub use story::{Chapter, PhotobookStory};
