//! Album profile aggregation.
//!
//! Pure reduction of the per-photo analyses into album-level statistics.
//! The only non-deterministic part is the title choice, which draws from a
//! per-emotion template list through an injectable RNG so tests can pin it.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::Rng;

use fotolibro_models::{AlbumProfile, NarrativeArc, PhotoAnalysis};

use crate::error::{PipelineError, PipelineResult};

/// Style recommended when neither the emotion nor the event table matches.
const DEFAULT_STYLE: &str = "clasico";

/// Emotion -> template style.
const EMOTION_STYLES: &[(&str, &str)] = &[
    ("alegria", "vibrante"),
    ("diversion", "vibrante"),
    ("amor", "romantico"),
    ("ternura", "delicado"),
    ("nostalgia", "vintage"),
    ("paz", "minimalista"),
    ("orgullo", "elegante"),
];

/// Event type -> template style, consulted when the emotion table misses.
const EVENT_STYLES: &[(&str, &str)] = &[
    ("ceremonia", "elegante"),
    ("boda", "elegante"),
    ("viaje", "aventura"),
    ("fiesta", "vibrante"),
    ("retrato", "minimalista"),
    ("naturaleza", "organico"),
];

/// Per-emotion album title templates.
const TITLE_TEMPLATES: &[(&str, &[&str])] = &[
    (
        "alegria",
        &["Dias de Sol", "Pura Alegria", "Momentos que Brillan"],
    ),
    (
        "amor",
        &["Nuestra Historia", "Con Todo el Corazon", "Juntos"],
    ),
    (
        "ternura",
        &["Pequenos Tesoros", "Dulces Momentos", "Con Ternura"],
    ),
    (
        "nostalgia",
        &["Como Ayer", "Recuerdos Queridos", "El Tiempo en Imagenes"],
    ),
    ("paz", &["Calma", "Instantes Serenos", "Respira"]),
];

/// Titles used when the dominant emotion has no template list.
const GENERIC_TITLES: &[&str] = &["Nuestro Album", "Momentos", "Historias en Imagenes"];

/// Reduce the full analysis list into an [`AlbumProfile`].
///
/// The list must not be empty; an empty submission is a fatal error caught
/// before any phase runs.
pub fn aggregate(
    analyses: &[PhotoAnalysis],
    client_name: Option<&str>,
    rng: &mut StdRng,
) -> PipelineResult<AlbumProfile> {
    if analyses.is_empty() {
        return Err(PipelineError::EmptySubmission);
    }

    let dominant_emotion = dominant(analyses.iter().map(|a| a.emotions.primary.as_str()));
    let dominant_event = dominant(analyses.iter().map(|a| a.narrative.event_type.as_str()));

    let average_quality = analyses
        .iter()
        .map(|a| a.composition.quality as f64)
        .sum::<f64>()
        / analyses.len() as f64;

    let recommended_style = recommended_style(&dominant_emotion, &dominant_event);
    let suggested_title = suggest_title(&dominant_emotion, client_name, rng);
    let narrative_arc = classify_arc(analyses);

    Ok(AlbumProfile {
        dominant_emotion,
        dominant_event,
        average_quality,
        recommended_style: recommended_style.to_string(),
        suggested_title,
        narrative_arc,
    })
}

/// Most frequent value; on equal counts the first-encountered value wins.
fn dominant<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for value in values {
        if !counts.contains_key(value) {
            first_seen.push(value);
        }
        *counts.entry(value).or_insert(0) += 1;
    }

    // Strictly-greater keeps the first-encountered value on ties.
    let mut best: Option<&str> = None;
    for value in first_seen {
        if best.is_none_or(|b| counts[value] > counts[b]) {
            best = Some(value);
        }
    }
    best.unwrap_or("neutral").to_string()
}

/// Emotion table first, then event table, then the hard default.
fn recommended_style(emotion: &str, event: &str) -> &'static str {
    EMOTION_STYLES
        .iter()
        .find(|(e, _)| *e == emotion)
        .or_else(|| EVENT_STYLES.iter().find(|(e, _)| *e == event))
        .map(|(_, style)| *style)
        .unwrap_or(DEFAULT_STYLE)
}

fn suggest_title(emotion: &str, client_name: Option<&str>, rng: &mut StdRng) -> String {
    let templates = TITLE_TEMPLATES
        .iter()
        .find(|(e, _)| *e == emotion)
        .map(|(_, t)| *t)
        .unwrap_or(GENERIC_TITLES);

    let base = templates[rng.random_range(0..templates.len())];
    match client_name {
        Some(name) if !name.is_empty() => format!("{} - {}", base, name),
        _ => base.to_string(),
    }
}

/// Chronological if the sequence hints are already non-decreasing, else an
/// emotional journey if at least 3 distinct emotions appear, else thematic.
fn classify_arc(analyses: &[PhotoAnalysis]) -> NarrativeArc {
    let non_decreasing = analyses
        .windows(2)
        .all(|w| w[0].narrative.sequence_hint <= w[1].narrative.sequence_hint);
    if non_decreasing {
        return NarrativeArc::Chronological;
    }

    let mut emotions: Vec<&str> = analyses.iter().map(|a| a.emotions.primary.as_str()).collect();
    emotions.sort_unstable();
    emotions.dedup();
    if emotions.len() >= 3 {
        NarrativeArc::EmotionalJourney
    } else {
        NarrativeArc::Thematic
    }
}
