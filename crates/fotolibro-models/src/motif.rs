//! Life-event motif classification.
//!
//! The motif is the album's overall life-event category (wedding, travel,
//! pregnancy, ...). It is a closed set: responses from the vision capability
//! are validated against it, and every motif has a static design/text
//! configuration looked up from a table rather than computed.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Closed set of life-event categories an album can be classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Motif {
    Wedding,
    Travel,
    BirthdayChild,
    BirthdayTeen,
    BirthdayAdult,
    MothersDay,
    FathersDay,
    BabyShower,
    BabyFirstYear,
    Pregnancy,
    AnniversaryCouple,
    AnniversaryOther,
    Graduation,
    Artistic,
    Pet,
    Family,
    #[default]
    Generic,
}

impl Motif {
    /// All motifs, in a stable order (used to build classification prompts).
    pub const ALL: [Motif; 17] = [
        Motif::Wedding,
        Motif::Travel,
        Motif::BirthdayChild,
        Motif::BirthdayTeen,
        Motif::BirthdayAdult,
        Motif::MothersDay,
        Motif::FathersDay,
        Motif::BabyShower,
        Motif::BabyFirstYear,
        Motif::Pregnancy,
        Motif::AnniversaryCouple,
        Motif::AnniversaryOther,
        Motif::Graduation,
        Motif::Artistic,
        Motif::Pet,
        Motif::Family,
        Motif::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wedding => "wedding",
            Self::Travel => "travel",
            Self::BirthdayChild => "birthday-child",
            Self::BirthdayTeen => "birthday-teen",
            Self::BirthdayAdult => "birthday-adult",
            Self::MothersDay => "mothers-day",
            Self::FathersDay => "fathers-day",
            Self::BabyShower => "baby-shower",
            Self::BabyFirstYear => "baby-first-year",
            Self::Pregnancy => "pregnancy",
            Self::AnniversaryCouple => "anniversary-couple",
            Self::AnniversaryOther => "anniversary-other",
            Self::Graduation => "graduation",
            Self::Artistic => "artistic",
            Self::Pet => "pet",
            Self::Family => "family",
            Self::Generic => "generic",
        }
    }

    /// Parse a motif string, validating it against the closed set.
    pub fn parse(value: &str) -> Option<Motif> {
        Motif::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == value.trim())
    }
}

impl std::fmt::Display for Motif {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Design configuration associated with a motif, looked up from the static
/// motif table.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MotifDesign {
    /// Template name this motif maps to
    pub template: String,

    /// Color palette (hex or named colors)
    pub color_palette: Vec<String>,

    /// Decorative elements to sprinkle through the book
    pub decorations: Vec<String>,

    /// Font style tag ("serif-elegante", "sans-moderno", ...)
    pub font_style: String,

    /// Overall mood tag
    pub mood: String,
}

/// Text configuration associated with a motif.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MotifText {
    /// Prefix used when building the cover title
    pub title_prefix: String,

    /// Dedication template; `{name}` is replaced with the client name
    pub dedication_template: String,

    /// Quote printed on the back cover
    pub back_cover_quote: String,
}

/// Narrative-flow hint associated with a motif.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NarrativeFlow {
    /// Structure hint ("ceremonia-fiesta", "ruta", "cronologico", ...)
    pub structure: String,

    /// Key moments the story should emphasize
    pub key_moments: Vec<String>,

    /// Pacing hint ("pausado", "dinamico", ...)
    pub pacing: String,
}

/// Result of classifying the whole album into a motif.
///
/// Produced once by the motif detector; immutable; consumed by the story
/// builder and the artistic curator.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EventMotifProfile {
    /// Detected motif (closed set)
    pub motif: Motif,

    /// Classifier confidence (0-100)
    pub confidence: u8,

    /// Free-text evidence backing the classification
    pub evidence: String,

    /// Static design bundle for this motif
    pub design: MotifDesign,

    /// Static text bundle for this motif
    pub text: MotifText,

    /// Narrative-flow hint for this motif
    pub flow: NarrativeFlow,
}
