//! Per-photo vision analysis results.
//!
//! One `PhotoAnalysis` is produced per input photo by the vision adapter and
//! consumed read-only by every downstream pipeline phase. When per-photo
//! analysis fails, a neutral fallback instance is substituted so downstream
//! code never has to special-case missing data.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Midpoint value used for 1-10 scores in fallback analyses.
pub const NEUTRAL_SCORE: u8 = 5;

/// Midpoint value for the 1-100 sequence hint in fallback analyses.
pub const NEUTRAL_SEQUENCE_HINT: u8 = 50;

/// Main subject category of a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum MainSubject {
    Portrait,
    Landscape,
    Group,
    Object,
    Pet,
    Detail,
    #[default]
    #[serde(other)]
    Unknown,
}

impl MainSubject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
            Self::Group => "group",
            Self::Object => "object",
            Self::Pet => "pet",
            Self::Detail => "detail",
            Self::Unknown => "unknown",
        }
    }
}

/// Setting category of a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    Indoor,
    Outdoor,
    Nature,
    Urban,
    Beach,
    Celebration,
    Home,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Setting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indoor => "indoor",
            Self::Outdoor => "outdoor",
            Self::Nature => "nature",
            Self::Urban => "urban",
            Self::Beach => "beach",
            Self::Celebration => "celebration",
            Self::Home => "home",
            Self::Unknown => "unknown",
        }
    }
}

/// Dominant color palette of a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorPalette {
    Warm,
    Cool,
    Vibrant,
    #[default]
    Muted,
    Monochrome,
}

/// Photo orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
    Square,
}

/// Suggested page placement for a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    FullPage,
    #[default]
    HalfPage,
    Collage,
    Background,
}

/// Emotional read of a single photo.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmotionAnalysis {
    /// Primary emotion tag (open vocabulary: "alegria", "ternura", "amor", ...)
    pub primary: String,

    /// Intensity of the primary emotion (1-10)
    pub intensity: u8,

    /// Free-text description of the emotional content
    pub description: String,
}

/// What is actually in the photo.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ContentAnalysis {
    /// Number of people visible
    pub people_count: u32,

    /// Whether any faces are visible
    pub has_faces: bool,

    /// Rough face-position tags ("center", "left-third", ...)
    #[serde(default)]
    pub face_positions: Vec<String>,

    /// Main subject category
    pub main_subject: MainSubject,

    /// Setting category
    pub setting: Setting,
}

/// Technical composition read of the photo.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CompositionAnalysis {
    /// Overall quality score (1-10)
    pub quality: u8,

    /// Lighting category ("natural", "golden-hour", "artificial", ...)
    pub lighting: String,

    /// Dominant color palette
    pub color_palette: ColorPalette,

    /// Focus category ("sharp", "soft", "shallow-dof", ...)
    pub focus: String,

    /// Orientation of the frame
    pub orientation: Orientation,
}

/// Narrative hints for ordering and caption generation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NarrativeHints {
    /// Event-type guess for this photo ("ceremonia", "viaje", "fiesta", ...)
    pub event_type: String,

    /// Suggested human-readable caption
    pub suggested_caption: String,

    /// Relative position estimate within the album (1-100)
    pub sequence_hint: u8,

    /// How important the photo is to the story (1-10)
    pub importance: u8,
}

/// Layout/design suggestions for a single photo.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DesignHints {
    /// Suggested page placement
    pub placement: Placement,

    /// Crop suggestion ("none", "tighten-on-faces", ...)
    pub crop_suggestion: String,

    /// Template styles this photo works well with
    #[serde(default)]
    pub compatible_styles: Vec<String>,
}

/// Complete per-photo analysis, produced once by the vision adapter.
///
/// Immutable once produced; downstream phases only read it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PhotoAnalysis {
    /// File path or name identifying the photo
    pub file_name: String,

    pub emotions: EmotionAnalysis,
    pub content: ContentAnalysis,
    pub composition: CompositionAnalysis,
    pub narrative: NarrativeHints,
    pub design: DesignHints,
}

impl PhotoAnalysis {
    /// Neutral fallback analysis used when the vision capability fails for
    /// one photo. Fully populated so downstream code never sees a hole:
    /// categoricals are unknown/neutral, scores sit at the midpoint, and the
    /// caption is the file's base name.
    pub fn fallback(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let caption = file_stem(&file_name);
        Self {
            file_name,
            emotions: EmotionAnalysis {
                primary: "neutral".to_string(),
                intensity: NEUTRAL_SCORE,
                description: String::new(),
            },
            content: ContentAnalysis {
                people_count: 0,
                has_faces: false,
                face_positions: Vec::new(),
                main_subject: MainSubject::Unknown,
                setting: Setting::Unknown,
            },
            composition: CompositionAnalysis {
                quality: NEUTRAL_SCORE,
                lighting: "unknown".to_string(),
                color_palette: ColorPalette::Muted,
                focus: "unknown".to_string(),
                orientation: Orientation::Landscape,
            },
            narrative: NarrativeHints {
                event_type: "general".to_string(),
                suggested_caption: caption,
                sequence_hint: NEUTRAL_SEQUENCE_HINT,
                importance: NEUTRAL_SCORE,
            },
            design: DesignHints {
                placement: Placement::HalfPage,
                crop_suggestion: "none".to_string(),
                compatible_styles: Vec::new(),
            },
        }
    }

    /// One-line textual summary used as context in subsequent vision calls
    /// and in batched classification prompts.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} ({}), {} people, subject={}, setting={}, event={}, quality={}/10, importance={}/10, seq~{}",
            self.file_name,
            self.emotions.primary,
            self.emotions.intensity,
            self.content.people_count,
            self.content.main_subject.as_str(),
            self.content.setting.as_str(),
            self.narrative.event_type,
            self.composition.quality,
            self.narrative.importance,
            self.narrative.sequence_hint,
        )
    }
}

/// Base name of a file without its extension, used for fallback captions.
fn file_stem(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_neutral_and_complete() {
        let fb = PhotoAnalysis::fallback("albums/boda/IMG_0042.jpg");
        assert_eq!(fb.emotions.primary, "neutral");
        assert_eq!(fb.emotions.intensity, NEUTRAL_SCORE);
        assert_eq!(fb.composition.quality, NEUTRAL_SCORE);
        assert_eq!(fb.narrative.importance, NEUTRAL_SCORE);
        assert_eq!(fb.narrative.suggested_caption, "IMG_0042");
        assert_eq!(fb.content.main_subject, MainSubject::Unknown);
        assert_eq!(fb.content.setting, Setting::Unknown);
    }

    #[test]
    fn test_fallback_caption_without_extension() {
        let fb = PhotoAnalysis::fallback("playa");
        assert_eq!(fb.narrative.suggested_caption, "playa");
    }

    #[test]
    fn test_unknown_categories_deserialize_to_unknown() {
        let subject: MainSubject = serde_json::from_str("\"drone-shot\"").unwrap();
        assert_eq!(subject, MainSubject::Unknown);
        let setting: Setting = serde_json::from_str("\"rooftop\"").unwrap();
        assert_eq!(setting, Setting::Unknown);
    }

    #[test]
    fn test_summary_mentions_key_fields() {
        let fb = PhotoAnalysis::fallback("uno.jpg");
        let summary = fb.summary();
        assert!(summary.contains("uno.jpg"));
        assert!(summary.contains("neutral"));
        assert!(summary.contains("quality=5/10"));
    }
}
