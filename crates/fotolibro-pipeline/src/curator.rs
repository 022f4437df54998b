//! Artistic curation: template, layout, typography, color, decorations.
//!
//! A pure rule engine over already-computed data, with no capability calls.
//! The only randomness is the back-cover quote choice, drawn through the
//! injected RNG so runs are reproducible under a fixed seed.

use rand::rngs::StdRng;
use rand::Rng;

use std::collections::HashSet;

use fotolibro_models::{
    AlbumProfile, ColorScheme, Decorations, DesignDecisions, EventMotifProfile, LayoutStrategy,
    MainSubject, PhotoAnalysis, PhotobookStory, QualityTargets, Setting, TemplateChoice,
    Typography,
};

use crate::error::{PipelineError, PipelineResult};

/// Importance (1-10) at or above which a photo is hero material.
const HERO_IMPORTANCE: u8 = 8;

/// Quality (1-10) a hero or bleed photo must reach.
const FEATURE_QUALITY: u8 = 7;

/// Importance band for collage candidates: `COLLAGE_MIN..HERO_IMPORTANCE`.
const COLLAGE_MIN_IMPORTANCE: u8 = 4;

/// First index eligible for a breathing-room page, then every tenth.
const BREATHING_START: usize = 8;
const BREATHING_STEP: usize = 10;

/// Score bonus for templates whose name contains the client's preference.
const PREFERENCE_BONUS: usize = 5;

/// Template catalog: name plus the keywords that argue for it. Declaration
/// order breaks score ties and ranks backups.
const TEMPLATE_CATALOG: &[(&str, &[&str])] = &[
    ("boda-clasica", &["boda", "ceremonia", "amor", "celebration", "elegante", "group"]),
    ("cuaderno-de-viaje", &["viaje", "ruta", "aventura", "urban", "nature", "landscape"]),
    ("fiesta-infantil", &["fiesta", "cumple", "alegria", "diversion", "celebration"]),
    ("primer-ano", &["bebe", "ternura", "home", "portrait"]),
    ("dulce-espera", &["embarazo", "espera", "ternura", "paz", "portrait"]),
    ("galeria", &["artistico", "monochrome", "detail", "object"]),
    ("mejor-amigo", &["mascota", "pet", "juego", "outdoor"]),
    ("familia", &["familia", "reunion", "amor", "home", "group"]),
    ("minimalista", &["paz", "calma", "nature", "landscape"]),
    ("clasico", &["general", "neutral", "retrato"]),
];

/// Back-cover quotes keyed by dominant emotion; one is chosen at random.
const CLOSING_QUOTES: &[(&str, &[&str])] = &[
    ("amor", &["Lo que bien se quiere, nunca se olvida.", "Contigo, todo."]),
    ("alegria", &["La alegria compartida es doble.", "Reir juntos lo cura todo."]),
    ("ternura", &["Lo pequeno es lo que mas pesa en el corazon."]),
    ("nostalgia", &["Lo vivido nadie nos lo quita.", "Ayer, hoy y siempre."]),
    ("paz", &["La calma tambien se guarda en papel."]),
];

const GENERIC_QUOTES: &[&str] = &[
    "Cada foto guarda una historia.",
    "Los momentos pasan, las imagenes quedan.",
];

/// Everything the curator needs from earlier phases.
pub struct CuratorInput<'a> {
    /// Photos in their final chronological order
    pub photos: &'a [PhotoAnalysis],
    pub profile: &'a AlbumProfile,
    pub motif: &'a EventMotifProfile,
    pub story: &'a PhotobookStory,
    pub style_preference: Option<&'a str>,
}

/// Make all concrete design decisions for the book.
///
/// Errors here indicate a programming defect (the curator is pure), so the
/// orchestrator treats them as fatal.
pub fn curate(input: CuratorInput<'_>, rng: &mut StdRng) -> PipelineResult<DesignDecisions> {
    if input.photos.is_empty() {
        return Err(PipelineError::DesignCurationFailed(
            "no photos to curate".to_string(),
        ));
    }
    if input.story.photo_captions.len() != input.photos.len() {
        return Err(PipelineError::DesignCurationFailed(format!(
            "caption count {} does not match photo count {}",
            input.story.photo_captions.len(),
            input.photos.len()
        )));
    }

    let template = choose_template(&input);
    let layout = layout_strategy(input.photos);
    let typography = typography(&input);
    let colors = color_scheme(input.motif);
    let decorations = decorations(input.motif, input.profile);
    let quality_targets = quality_targets(input.profile);

    let mut decisions = DesignDecisions {
        template,
        layout,
        typography,
        colors,
        decorations,
        quality_targets,
    };
    decisions.typography.back_cover_text =
        back_cover_text(&input.story.back_cover_text, &input.profile.dominant_emotion, rng);

    Ok(decisions)
}

/// Keyword set the templates are scored against: dominant emotion plus
/// every photo's event type, main subject, and setting.
fn album_keywords(input: &CuratorInput<'_>) -> HashSet<String> {
    let mut keywords = HashSet::new();
    keywords.insert(input.profile.dominant_emotion.to_lowercase());
    for photo in input.photos {
        keywords.insert(photo.narrative.event_type.to_lowercase());
        keywords.insert(photo.content.main_subject.as_str().to_string());
        keywords.insert(photo.content.setting.as_str().to_string());
    }
    keywords
}

fn choose_template(input: &CuratorInput<'_>) -> TemplateChoice {
    let keywords = album_keywords(input);
    let preference = input.style_preference.map(|p| p.to_lowercase());

    // Stable sort keeps catalog declaration order on ties.
    let mut scored: Vec<(usize, &str)> = TEMPLATE_CATALOG
        .iter()
        .map(|(name, template_keywords)| {
            let mut score = template_keywords
                .iter()
                .filter(|k| keywords.contains(**k))
                .count();
            if let Some(pref) = &preference {
                if !pref.is_empty() && name.contains(pref.as_str()) {
                    score += PREFERENCE_BONUS;
                }
            }
            (score, *name)
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let (score, name) = scored[0];
    let backups = scored[1..]
        .iter()
        .take(3)
        .map(|(_, n)| n.to_string())
        .collect();

    let matched: Vec<&str> = TEMPLATE_CATALOG
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, ks)| ks.iter().copied().filter(|k| keywords.contains(*k)).collect())
        .unwrap_or_default();

    let reasoning = if matched.is_empty() {
        format!("'{}' elegido por defecto (sin coincidencias claras)", name)
    } else {
        format!(
            "'{}' coincide con el album en: {} (puntuacion {})",
            name,
            matched.join(", "),
            score
        )
    };

    TemplateChoice {
        name: name.to_string(),
        reasoning,
        backups,
    }
}

/// Assign per-photo layout roles over the ordered sequence.
fn layout_strategy(photos: &[PhotoAnalysis]) -> LayoutStrategy {
    let last = photos.len() - 1;
    let mut layout = LayoutStrategy::default();

    for (i, photo) in photos.iter().enumerate() {
        let scored_hero = photo.narrative.importance >= HERO_IMPORTANCE
            && photo.composition.quality >= FEATURE_QUALITY;
        // Openings and closings always get full-page treatment.
        if scored_hero || i == 0 || i == last {
            layout.hero_pages.push(i);
        } else if photo.narrative.importance >= COLLAGE_MIN_IMPORTANCE
            && photo.narrative.importance < HERO_IMPORTANCE
        {
            layout.collage_pages.push(i);
        }

        // Bleed candidacy is independent; a photo may be hero and bleed.
        let scenic = photo.content.main_subject == MainSubject::Landscape
            || photo.content.setting == Setting::Nature;
        if scenic && photo.composition.quality >= FEATURE_QUALITY {
            layout.bleed_pages.push(i);
        }
    }

    let mut idx = BREATHING_START;
    while idx < photos.len() {
        if !layout.hero_pages.contains(&idx) && !layout.collage_pages.contains(&idx) {
            layout.breathing_pages.push(idx);
        }
        idx += BREATHING_STEP;
    }

    layout
}

fn typography(input: &CuratorInput<'_>) -> Typography {
    Typography {
        cover_text: input.story.cover_title.clone(),
        back_cover_text: input.story.back_cover_text.clone(),
        spine_text: input.story.cover_title.clone(),
        captions: input.story.photo_captions.clone(),
        font_style: input.motif.design.font_style.clone(),
    }
}

/// Primary/secondary/accent come from the motif palette, padded with
/// neutral defaults when the palette is short.
fn color_scheme(motif: &EventMotifProfile) -> ColorScheme {
    let palette = &motif.design.color_palette;
    let pick =
        |i: usize, default: &str| palette.get(i).cloned().unwrap_or_else(|| default.to_string());

    ColorScheme {
        primary: pick(0, "#ffffff"),
        secondary: pick(1, "#cccccc"),
        accent: pick(2, "#555555"),
        mood: motif.design.mood.clone(),
    }
}

fn decorations(motif: &EventMotifProfile, profile: &AlbumProfile) -> Decorations {
    let clip_art = motif.design.decorations.clone();
    Decorations {
        // Restrained styles frame their photos; busy ones run free.
        use_frames: matches!(
            profile.recommended_style.as_str(),
            "clasico" | "elegante" | "vintage" | "romantico"
        ),
        use_backgrounds: !clip_art.is_empty(),
        clip_art,
        style: motif.design.mood.clone(),
    }
}

/// Quality floors derived from the album's own average, clamped so a weak
/// album still prints and a strong album keeps its standard.
fn quality_targets(profile: &AlbumProfile) -> QualityTargets {
    let min_photo_quality = ((profile.average_quality.round() as i64) - 2).clamp(3, 8) as u8;
    QualityTargets {
        min_photo_quality,
        min_hero_quality: FEATURE_QUALITY,
        min_bleed_quality: FEATURE_QUALITY,
    }
}

/// Story back-cover text plus a randomly chosen emotion-keyed quote.
fn back_cover_text(story_text: &str, emotion: &str, rng: &mut StdRng) -> String {
    let quotes = CLOSING_QUOTES
        .iter()
        .find(|(e, _)| *e == emotion)
        .map(|(_, qs)| *qs)
        .unwrap_or(GENERIC_QUOTES);
    let quote = quotes[rng.random_range(0..quotes.len())];

    if story_text.is_empty() {
        quote.to_string()
    } else {
        format!("{}\n{}", story_text, quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fotolibro_models::{ChronologyScan, NarrativeArc};
    use rand::SeedableRng;

    fn photo(name: &str, importance: u8, quality: u8) -> PhotoAnalysis {
        let mut p = PhotoAnalysis::fallback(name);
        p.narrative.importance = importance;
        p.composition.quality = quality;
        p
    }

    fn profile() -> AlbumProfile {
        AlbumProfile {
            dominant_emotion: "amor".to_string(),
            dominant_event: "boda".to_string(),
            average_quality: 7.5,
            recommended_style: "romantico".to_string(),
            suggested_title: "Nuestra Historia".to_string(),
            narrative_arc: NarrativeArc::Chronological,
        }
    }

    fn motif() -> EventMotifProfile {
        let config = crate::motif_table::motif_config(fotolibro_models::Motif::Wedding);
        EventMotifProfile {
            motif: fotolibro_models::Motif::Wedding,
            confidence: 90,
            evidence: String::new(),
            design: config.design,
            text: config.text,
            flow: config.flow,
        }
    }

    fn story(captions: usize) -> PhotobookStory {
        PhotobookStory {
            cover_title: "Nuestra Boda".to_string(),
            cover_subtitle: "Un dia inolvidable".to_string(),
            dedication: "Para nosotros.".to_string(),
            photo_captions: vec!["Un momento".to_string(); captions],
            back_cover_text: "Fin".to_string(),
            epilogue: None,
            theme: "wedding".to_string(),
            chronology: ChronologyScan::unknown(),
            chapters: Vec::new(),
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_first_and_last_are_always_hero() {
        let photos = vec![
            photo("a", 2, 3),
            photo("b", 5, 5),
            photo("c", 2, 3),
        ];
        let layout = layout_strategy(&photos);
        assert!(layout.hero_pages.contains(&0));
        assert!(layout.hero_pages.contains(&2));
        assert_eq!(layout.collage_pages, vec![1]);
    }

    #[test]
    fn test_hero_needs_importance_and_quality() {
        let photos = vec![
            photo("first", 1, 1),
            photo("strong", 9, 8),   // hero by score
            photo("important-blurry", 9, 5), // importance without quality
            photo("last", 1, 1),
        ];
        let layout = layout_strategy(&photos);
        assert_eq!(layout.hero_pages, vec![0, 1, 3]);
        assert!(!layout.hero_pages.contains(&2));
    }

    #[test]
    fn test_bleed_overlaps_hero() {
        let mut scenic = photo("scenic", 9, 8);
        scenic.content.main_subject = MainSubject::Landscape;
        let photos = vec![photo("a", 1, 1), scenic, photo("b", 1, 1)];
        let layout = layout_strategy(&photos);
        assert!(layout.hero_pages.contains(&1));
        assert_eq!(layout.bleed_pages, vec![1]);
    }

    #[test]
    fn test_breathing_pages_skip_claimed_indices() {
        // 20 low-importance photos: candidates at 8 and 18.
        let mut photos: Vec<_> = (0..20).map(|i| photo(&format!("p{}", i), 1, 1)).collect();
        let layout = layout_strategy(&photos);
        assert_eq!(layout.breathing_pages, vec![8, 18]);

        // Claim index 8 as collage: only 18 remains.
        photos[8] = photo("p8", 5, 5);
        let layout = layout_strategy(&photos);
        assert!(layout.collage_pages.contains(&8));
        assert_eq!(layout.breathing_pages, vec![18]);
    }

    #[test]
    fn test_template_scoring_uses_album_keywords() {
        let mut photos = vec![photo("a", 5, 5), photo("b", 5, 5)];
        for p in &mut photos {
            p.narrative.event_type = "boda".to_string();
            p.content.setting = Setting::Celebration;
        }
        let motif = motif();
        let story = story(2);
        let profile = profile();
        let choice = choose_template(&CuratorInput {
            photos: &photos,
            profile: &profile,
            motif: &motif,
            story: &story,
            style_preference: None,
        });
        assert_eq!(choice.name, "boda-clasica");
        assert_eq!(choice.backups.len(), 3);
        assert!(choice.reasoning.contains("boda"));
    }

    #[test]
    fn test_style_preference_bonus_overrides_keywords() {
        let mut photos = vec![photo("a", 5, 5)];
        photos[0].narrative.event_type = "boda".to_string();
        let motif = motif();
        let story = story(1);
        let profile = profile();
        let choice = choose_template(&CuratorInput {
            photos: &photos,
            profile: &profile,
            motif: &motif,
            story: &story,
            style_preference: Some("minimalista"),
        });
        assert_eq!(choice.name, "minimalista");
    }

    #[test]
    fn test_curate_is_deterministic_under_fixed_seed() {
        let photos = vec![photo("a", 5, 5), photo("b", 9, 9)];
        let motif = motif();
        let story = story(2);
        let profile = profile();
        let input = || CuratorInput {
            photos: &photos,
            profile: &profile,
            motif: &motif,
            story: &story,
            style_preference: None,
        };
        let a = curate(input(), &mut rng()).unwrap();
        let b = curate(input(), &mut rng()).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_caption_count_mismatch_is_fatal() {
        let photos = vec![photo("a", 5, 5), photo("b", 5, 5)];
        let motif = motif();
        let story = story(1);
        let profile = profile();
        let result = curate(
            CuratorInput {
                photos: &photos,
                profile: &profile,
                motif: &motif,
                story: &story,
                style_preference: None,
            },
            &mut rng(),
        );
        assert!(matches!(result, Err(PipelineError::DesignCurationFailed(_))));
    }

    #[test]
    fn test_colors_come_from_motif_palette() {
        let scheme = color_scheme(&motif());
        assert_eq!(scheme.primary, "#f5f0e8");
        assert_eq!(scheme.accent, "#ffffff");
        assert_eq!(scheme.mood, "romantico");
    }
}
