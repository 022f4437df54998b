//! Story building: holistic chronology, narrative texts, and chapters.
//!
//! Two capability calls run in sequence: a holistic timeline scan over the
//! whole photo set, then narrative text generation conditioned on the final
//! order. A deterministic, call-free chapter split follows. Both calls
//! degrade to typed fallbacks; the chapter split always succeeds.

use std::sync::Arc;

use tracing::{info, warn};

use fotolibro_models::{
    apply_order, AlbumProfile, Chapter, ChronologyScan, EventMotifProfile, PhotoAnalysis,
    PhotobookStory, TimelineSpan,
};
use fotolibro_vision::{NarrativeContext, NarrativeTexts, VisionService};

/// Albums at or below this size always get a single chapter.
const SINGLE_CHAPTER_MAX_PHOTOS: usize = 10;

/// Fixed chapter titles for multi-year albums, in order.
const LIFETIME_CHAPTERS: [(&str, &str); 3] = [
    ("Los Primeros Pasos", "tierno"),
    ("Creciendo Juntos", "calido"),
    ("Hasta Hoy", "celebratorio"),
];

/// Generic words (two languages) that make a custom title too bland to
/// stand alone. Exact match or "word " prefix match, case-insensitive.
const GENERIC_TITLE_WORDS: &[&str] = &[
    "fotos",
    "foto",
    "album",
    "recuerdos",
    "imagenes",
    "photos",
    "photo",
    "memories",
    "images",
    "pictures",
];

/// Everything the story builder needs from earlier phases.
pub struct StoryInput<'a> {
    /// Photos in arbiter order
    pub photos: &'a [PhotoAnalysis],
    pub profile: &'a AlbumProfile,
    pub motif: &'a EventMotifProfile,
    pub client_name: &'a str,
    pub custom_title: Option<&'a str>,
}

/// Story result plus the final photo order downstream phases must use.
pub struct StoryOutcome {
    pub story: PhotobookStory,

    /// Photos in the story's final chronological order
    pub ordered_photos: Vec<PhotoAnalysis>,

    /// Recovered failures, for the orchestrator's error list
    pub errors: Vec<String>,
}

/// Build the complete narrative for an album.
pub async fn build_story(
    service: &Arc<dyn VisionService>,
    input: StoryInput<'_>,
) -> StoryOutcome {
    let mut errors = Vec::new();

    // Sub-phase 1: holistic timeline scan, possibly refining the order.
    let (scan, ordered_photos) = match scan_chronology(service, input.photos).await {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "Chronology scan failed, keeping arbiter order");
            errors.push(format!("chronology scan: {}", e));
            (ChronologyScan::unknown(), input.photos.to_vec())
        }
    };

    info!(
        timeline = scan.timeline.as_str(),
        age_progression = scan.age_progression,
        seasonal_flow = scan.seasonal_flow,
        "Timeline classified"
    );

    // Sub-phase 2: narrative texts over the final order.
    let context = NarrativeContext {
        client_name: input.client_name.to_string(),
        motif: input.motif.motif,
        dominant_emotion: input.profile.dominant_emotion.clone(),
        timeline: scan.timeline,
        custom_title: input.custom_title.map(|t| t.to_string()),
    };
    let ordered_summaries: Vec<String> = ordered_photos.iter().map(|p| p.summary()).collect();

    let texts = match service.generate_narrative(&ordered_summaries, &context).await {
        Ok(texts) => texts,
        Err(e) => {
            warn!(error = %e, "Narrative generation failed, using template texts");
            errors.push(format!("narrative generation: {}", e));
            fallback_texts(&ordered_photos, &input)
        }
    };

    let cover_title = resolve_title(input.custom_title, &texts);
    let chapters = split_chapters(&ordered_photos, &scan);

    let story = PhotobookStory {
        cover_title,
        cover_subtitle: texts.cover_subtitle,
        dedication: texts.dedication,
        photo_captions: texts.photo_captions,
        back_cover_text: texts.back_cover_text,
        epilogue: texts.epilogue,
        theme: input.motif.motif.as_str().to_string(),
        chronology: scan,
        chapters,
    };

    StoryOutcome {
        story,
        ordered_photos,
        errors,
    }
}

/// One holistic classification call; the returned order is already
/// permutation-validated at the capability boundary.
async fn scan_chronology(
    service: &Arc<dyn VisionService>,
    photos: &[PhotoAnalysis],
) -> Result<(ChronologyScan, Vec<PhotoAnalysis>), String> {
    let summaries: Vec<String> = photos.iter().map(|p| p.summary()).collect();
    let response = service
        .detect_chronology(&summaries)
        .await
        .map_err(|e| e.to_string())?;

    let ordered = apply_order(photos, &response.chronological_order)
        .ok_or_else(|| "chronological order is not a permutation".to_string())?;

    Ok((
        ChronologyScan {
            timeline: response.timeline_type,
            age_progression: response.age_progression,
            age_details: response.age_details,
            seasonal_flow: response.seasonal_flow,
            seasonal_details: response.seasonal_details,
            narrative_arc: response.narrative_arc,
            confidence: response.confidence.min(100),
        },
        ordered,
    ))
}

/// Generic but personalized texts used when narrative generation fails.
/// Captions reuse each photo's own suggested caption, so the caption count
/// always matches the photo count.
fn fallback_texts(ordered_photos: &[PhotoAnalysis], input: &StoryInput<'_>) -> NarrativeTexts {
    let dedication = input
        .motif
        .text
        .dedication_template
        .replace("{name}", input.client_name);

    NarrativeTexts {
        cover_title: input.motif.text.title_prefix.clone(),
        cover_subtitle: input.profile.suggested_title.clone(),
        dedication,
        photo_captions: ordered_photos
            .iter()
            .map(|p| p.narrative.suggested_caption.clone())
            .collect(),
        back_cover_text: input.motif.text.back_cover_quote.clone(),
        epilogue: None,
    }
}

/// A client-supplied title wins unless it is a blacklisted generic word, in
/// which case the generated subtitle is appended rather than discarding it.
fn resolve_title(custom_title: Option<&str>, texts: &NarrativeTexts) -> String {
    match custom_title {
        Some(custom) if !custom.trim().is_empty() => {
            if is_generic_title(custom) {
                format!("{}: {}", custom, texts.cover_subtitle)
            } else {
                custom.to_string()
            }
        }
        _ => texts.cover_title.clone(),
    }
}

fn is_generic_title(title: &str) -> bool {
    let lowered = title.trim().to_lowercase();
    GENERIC_TITLE_WORDS
        .iter()
        .any(|word| lowered == *word || lowered.starts_with(&format!("{} ", word)))
}

/// Deterministic chapter split. Strategy by timeline classification:
/// single-day or small albums get one chapter; multi-year albums get three
/// near-equal chapters with fixed titles; everything else groups contiguous
/// runs of per-photo event types in first-seen order.
pub fn split_chapters(photos: &[PhotoAnalysis], scan: &ChronologyScan) -> Vec<Chapter> {
    if photos.is_empty() {
        return Vec::new();
    }

    if scan.timeline == TimelineSpan::SingleDay || photos.len() <= SINGLE_CHAPTER_MAX_PHOTOS {
        return vec![Chapter {
            title: "Un Dia Para Recordar".to_string(),
            tone: photos[0].emotions.primary.clone(),
            photo_start: 0,
            photo_end: photos.len(),
            caption: "Todo lo que vivimos".to_string(),
            page_start: 1,
            page_end: photos.len() as u32,
        }];
    }

    if matches!(scan.timeline, TimelineSpan::Years | TimelineSpan::Decades) {
        return lifetime_chapters(photos.len());
    }

    event_type_chapters(photos)
}

/// Exactly three chapters of ceil(n/3) photos; the last absorbs the
/// remainder.
fn lifetime_chapters(photo_count: usize) -> Vec<Chapter> {
    let per_chapter = photo_count.div_ceil(3);
    let mut chapters = Vec::with_capacity(3);
    let mut start = 0usize;

    for (title, tone) in LIFETIME_CHAPTERS {
        let end = (start + per_chapter).min(photo_count);
        chapters.push(Chapter {
            title: title.to_string(),
            tone: tone.to_string(),
            photo_start: start,
            photo_end: end,
            caption: String::new(),
            page_start: start as u32 + 1,
            page_end: end as u32,
        });
        start = end;
    }

    chapters
}

/// One chapter per contiguous run of the same per-photo event type, in
/// first-seen order. Non-adjacent repeats of an event type deliberately
/// produce separate chapters with the same title; merging them would break
/// page-range contiguity.
fn event_type_chapters(photos: &[PhotoAnalysis]) -> Vec<Chapter> {
    let mut chapters: Vec<Chapter> = Vec::new();
    let mut run_start = 0usize;

    for i in 1..=photos.len() {
        let run_ends = i == photos.len()
            || photos[i].narrative.event_type != photos[run_start].narrative.event_type;
        if !run_ends {
            continue;
        }

        let event_type = &photos[run_start].narrative.event_type;
        chapters.push(Chapter {
            title: capitalize(event_type),
            tone: photos[run_start].emotions.primary.clone(),
            photo_start: run_start,
            photo_end: i,
            caption: format!("Momentos de {}", event_type),
            page_start: run_start as u32 + 1,
            page_end: i as u32,
        });
        run_start = i;
    }

    chapters
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
