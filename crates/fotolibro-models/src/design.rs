//! Concrete design decisions for page composition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Template choice with reasoning and ranked alternatives.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TemplateChoice {
    /// Name of the winning template
    pub name: String,

    /// Why this template was chosen
    pub reasoning: String,

    /// Ranked backup templates (best first)
    pub backups: Vec<String>,
}

/// Per-photo layout roles, as index sets over the ordered photo sequence.
///
/// The sets are disjoint by intent but tolerate overlap for bleed pages:
/// a photo can be both a hero and a bleed candidate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LayoutStrategy {
    /// Photos given prominent full-page treatment
    pub hero_pages: Vec<usize>,

    /// Photos grouped into collage pages
    pub collage_pages: Vec<usize>,

    /// Photos printed edge-to-edge
    pub bleed_pages: Vec<usize>,

    /// Indices where a blank breathing-room page is inserted
    pub breathing_pages: Vec<usize>,
}

/// Typography decisions for the book.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Typography {
    /// Text printed on the cover
    pub cover_text: String,

    /// Text printed on the back cover
    pub back_cover_text: String,

    /// Text printed on the spine
    pub spine_text: String,

    /// One caption per ordered photo (aligned 1:1 with the sequence)
    pub captions: Vec<String>,

    /// Font style tag
    pub font_style: String,
}

/// Color scheme for the book.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ColorScheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,

    /// Mood tag the scheme conveys
    pub mood: String,
}

/// Decorative element decisions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Decorations {
    /// Whether photos get frames
    pub use_frames: bool,

    /// Clip-art elements to use
    pub clip_art: Vec<String>,

    /// Whether decorated backgrounds are used
    pub use_backgrounds: bool,

    /// Decoration style tag
    pub style: String,
}

/// Minimum quality thresholds (1-10) the composition should respect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct QualityTargets {
    /// Minimum quality for any printed photo
    pub min_photo_quality: u8,

    /// Minimum quality for hero pages
    pub min_hero_quality: u8,

    /// Minimum quality for edge-to-edge bleed pages
    pub min_bleed_quality: u8,
}

/// All concrete design decisions for one photobook.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DesignDecisions {
    pub template: TemplateChoice,
    pub layout: LayoutStrategy,
    pub typography: Typography,
    pub colors: ColorScheme,
    pub decorations: Decorations,
    pub quality_targets: QualityTargets,
}
