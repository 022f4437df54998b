//! Prompt builders for each capability request shape.
//!
//! Responses are always requested as a single JSON object matching the
//! serde types in [`crate::service`]; anything that deviates is rejected by
//! schema validation on the way back in.

use fotolibro_models::Motif;

use crate::service::{NarrativeContext, PatternKind};

/// Instruction for single-photo analysis.
pub fn photo_analysis_prompt(file_name: &str, context_summary: Option<&str>) -> String {
    let mut prompt = format!(
        r#"You are a professional photobook curator. Analyze this photo ("{}") for inclusion in a custom photobook.

Return ONLY a single JSON object with this schema:
{{
  "file_name": "{}",
  "emotions": {{ "primary": "one word, e.g. alegria/ternura/amor/orgullo/paz/nostalgia/diversion/neutral", "intensity": 1-10, "description": "short free text" }},
  "content": {{ "people_count": 0, "has_faces": false, "face_positions": ["center"], "main_subject": "portrait|landscape|group|object|pet|detail|unknown", "setting": "indoor|outdoor|nature|urban|beach|celebration|home|unknown" }},
  "composition": {{ "quality": 1-10, "lighting": "natural|golden-hour|artificial|low-light|unknown", "color_palette": "warm|cool|vibrant|muted|monochrome", "focus": "sharp|soft|shallow-dof|unknown", "orientation": "landscape|portrait|square" }},
  "narrative": {{ "event_type": "short tag, e.g. ceremonia/viaje/fiesta/retrato/general", "suggested_caption": "one warm sentence in Spanish", "sequence_hint": 1-100, "importance": 1-10 }},
  "design": {{ "placement": "full_page|half_page|collage|background", "crop_suggestion": "none or short instruction", "compatible_styles": ["clasico", "moderno"] }}
}}"#,
        file_name, file_name
    );

    if let Some(context) = context_summary {
        prompt.push_str(
            "\n\nPhotos already analyzed in this album (use only for narrative coherence, e.g. consistent sequence_hint values):\n",
        );
        prompt.push_str(context);
    }

    prompt
}

/// Instruction for whole-album motif classification.
pub fn motif_prompt(summaries: &[String], client_hint: Option<&str>) -> String {
    let motif_list = Motif::ALL
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = format!(
        r#"You are classifying a photo album into exactly one life-event category.

Allowed categories (choose one, verbatim): {}

Album photos, in upload order:
{}
"#,
        motif_list,
        numbered(summaries)
    );

    if let Some(hint) = client_hint {
        prompt.push_str(&format!(
            "\nThe customer described the occasion as: \"{}\". Weigh this strongly but verify it against the photos.\n",
            hint
        ));
    }

    prompt.push_str(
        r#"
IMPORTANT: You must strictly follow this output format.
Return ONLY a single JSON object with this schema:
{
  "primary_motif": "one of the allowed categories",
  "confidence": 0-100,
  "evidence": "what in the photos supports this",
  "secondary_motif": "optional second candidate or null",
  "key_indicators": ["short", "tags"]
}"#,
    );

    prompt
}

/// Domain-specific instruction for one specialized pattern detection.
pub fn pattern_prompt(kind: PatternKind, summaries: &[String]) -> String {
    let (domain, extra_fields) = match kind {
        PatternKind::Pregnancy => (
            r#"Determine whether these photos document a pregnancy progression: a growing belly across photos, maternity poses, ultrasound images, a consistent protagonist. If so, order the photos from earliest to latest pregnancy stage and estimate the week of pregnancy for each ordered photo."#,
            r#"  "weeks": [12, 20, 28, 36],"#,
        ),
        PatternKind::Travel => (
            r#"Determine whether these photos document a trip or travel route: changing landmarks, transport, luggage, distinct locations. If so, order the photos along the most plausible route and list the locations visited in order."#,
            r#"  "route": ["Madrid", "Lisboa", "Oporto"],"#,
        ),
        PatternKind::Event => (
            r#"Determine whether these photos document the phases of a single event (for example preparations, ceremony, celebration). If so, order the photos by event phase and name the phases you detected."#,
            r#"  "phases": ["preparativos", "ceremonia", "fiesta"],"#,
        ),
    };

    format!(
        r#"{}

Album photos, in upload order (index: summary):
{}

Only report matched=true with confidence >= 70 when the evidence is clear.

IMPORTANT: You must strictly follow this output format.
Return ONLY a single JSON object with this schema:
{{
  "matched": true,
  "confidence": 0-100,
  "evidence": "what supports the detection",
  "chronological_order": [0, 2, 1],
{}
}}

"chronological_order" must contain every input index exactly once."#,
        domain,
        numbered(summaries),
        extra_fields
    )
}

/// Instruction for the holistic timeline classification.
pub fn chronology_prompt(summaries: &[String]) -> String {
    format!(
        r#"You are reconstructing the timeline of a photo album for a printed photobook.

Album photos, in upload order (index: summary):
{}

Classify the overall time span the album covers and propose the best
chronological order of the photos.

IMPORTANT: You must strictly follow this output format.
Return ONLY a single JSON object with this schema:
{{
  "timeline_type": "single_day|days|weeks|months|years|decades|unknown",
  "age_progression": false,
  "age_details": "who ages and how, or empty",
  "seasonal_flow": false,
  "seasonal_details": "which seasons appear, or empty",
  "chronological_order": [0, 1, 2],
  "narrative_arc": "one sentence describing the story shape",
  "confidence": 0-100
}}

"chronological_order" must contain every input index exactly once."#,
        numbered(summaries)
    )
}

/// Instruction for narrative text generation over the ordered photos.
pub fn narrative_prompt(ordered_summaries: &[String], context: &NarrativeContext) -> String {
    let mut prompt = format!(
        r#"You are writing the texts of a printed photobook in warm, natural Spanish.

The book is for {} and documents: {}. Dominant emotion: {}. Time span: {}.

Photos in final book order (index: summary):
{}
"#,
        context.client_name,
        context.motif.as_str(),
        context.dominant_emotion,
        context.timeline.as_str(),
        numbered(ordered_summaries)
    );

    if let Some(title) = &context.custom_title {
        prompt.push_str(&format!(
            "\nThe customer asked for the title \"{}\"; honor it in spirit when writing the subtitle.\n",
            title
        ));
    }

    prompt.push_str(&format!(
        r#"
IMPORTANT: You must strictly follow this output format.
Return ONLY a single JSON object with this schema:
{{
  "cover_title": "2-5 words",
  "cover_subtitle": "one line",
  "dedication": "2-3 sentences addressed to the reader",
  "photo_captions": ["one caption per photo, exactly {} entries, in order"],
  "back_cover_text": "short closing text",
  "epilogue": "optional closing paragraph or null"
}}

"photo_captions" must contain exactly {} entries."#,
        ordered_summaries.len(),
        ordered_summaries.len()
    ));

    prompt
}

/// Render summaries as an index-prefixed list.
fn numbered(summaries: &[String]) -> String {
    summaries
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}: {}", i, s))
        .collect::<Vec<_>>()
        .join("\n")
}
