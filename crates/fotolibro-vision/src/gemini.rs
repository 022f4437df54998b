//! Gemini client implementing the vision/reasoning capability.
//!
//! All five request shapes go through one `generateContent` call with a
//! JSON response mime type. A fixed model-fallback list is tried in order;
//! responses wrapped in markdown code fences are unwrapped before parsing.

use std::time::Duration;

use base64::Engine;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use async_trait::async_trait;
use fotolibro_models::PhotoAnalysis;

use crate::error::{VisionError, VisionResult};
use crate::prompts;
use crate::service::{
    ChronologyScanResponse, MotifDetection, NarrativeContext, NarrativeTexts, PatternDetection,
    PatternKind, PhotoSource, VisionService,
};

/// Default per-request timeout. The capability itself defines no latency
/// bound, so the client imposes one.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Models tried in order until one succeeds.
const DEFAULT_MODELS: [&str; 3] = ["gemini-2.5-flash", "gemini-2.5-flash-lite", "gemini-2.5-pro"];

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub api_key: String,

    /// Model-fallback list, tried in order
    pub models: Vec<String>,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl VisionConfig {
    /// Load configuration from the environment (`GEMINI_API_KEY`,
    /// optional `VISION_REQUEST_TIMEOUT_SECS`).
    pub fn from_env() -> VisionResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| VisionError::config("GEMINI_API_KEY not set"))?;

        let request_timeout = std::env::var("VISION_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Ok(Self {
            api_key,
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            request_timeout,
        })
    }
}

/// Gemini-backed implementation of [`VisionService`].
pub struct GeminiVision {
    config: VisionConfig,
    client: Client,
}

/// Gemini API request.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    Text(String),
    InlineData(InlineData),
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

/// Gemini API response.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

impl GeminiVision {
    pub fn new(config: VisionConfig) -> VisionResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| VisionError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> VisionResult<Self> {
        Self::new(VisionConfig::from_env()?)
    }

    /// Run one structured call, trying each configured model in order.
    async fn call<T: DeserializeOwned>(
        &self,
        prompt: String,
        image: Option<&PhotoSource>,
    ) -> VisionResult<T> {
        let mut last_error = None;

        for model in &self.config.models {
            debug!(model = %model, "Attempting Gemini call");
            match self.call_model(model, &prompt, image).await {
                Ok(parsed) => {
                    info!(model = %model, "Gemini call succeeded");
                    return Ok(parsed);
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "Gemini model failed");
                    last_error = Some(e);
                }
            }
        }

        Err(VisionError::AllModelsFailed(
            last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no models configured".to_string()),
        ))
    }

    async fn call_model<T: DeserializeOwned>(
        &self,
        model: &str,
        prompt: &str,
        image: Option<&PhotoSource>,
    ) -> VisionResult<T> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            model, self.config.api_key
        );

        let mut parts = vec![Part::Text(prompt.to_string())];
        if let Some(photo) = image {
            parts.push(Part::InlineData(InlineData {
                mime_type: photo.mime_type.clone(),
                data: base64::engine::general_purpose::STANDARD.encode(&photo.data),
            }));
        }

        let request = GeminiRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| VisionError::request(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(VisionError::Api { status, body });
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| VisionError::parse(format!("malformed Gemini envelope: {}", e)))?;

        let text = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or(VisionError::EmptyResponse)?;

        serde_json::from_str(strip_code_fences(text))
            .map_err(|e| VisionError::parse(format!("response JSON did not match schema: {}", e)))
    }
}

/// Strip a surrounding markdown code fence, if present.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

#[async_trait]
impl VisionService for GeminiVision {
    async fn analyze_photo(
        &self,
        photo: &PhotoSource,
        context_summary: Option<&str>,
    ) -> VisionResult<PhotoAnalysis> {
        let prompt = prompts::photo_analysis_prompt(&photo.file_name, context_summary);
        self.call(prompt, Some(photo)).await
    }

    async fn detect_motif(
        &self,
        summaries: &[String],
        client_hint: Option<&str>,
    ) -> VisionResult<MotifDetection> {
        let prompt = prompts::motif_prompt(summaries, client_hint);
        let detection: MotifDetection = self.call(prompt, None).await?;
        // Out-of-enum motifs are a contract violation, surfaced here.
        detection.motif()?;
        Ok(detection)
    }

    async fn detect_pattern(
        &self,
        kind: PatternKind,
        summaries: &[String],
    ) -> VisionResult<PatternDetection> {
        let prompt = prompts::pattern_prompt(kind, summaries);
        let detection: PatternDetection = self.call(prompt, None).await?;
        detection.validate(summaries.len())?;
        Ok(detection)
    }

    async fn detect_chronology(
        &self,
        summaries: &[String],
    ) -> VisionResult<ChronologyScanResponse> {
        let prompt = prompts::chronology_prompt(summaries);
        let scan: ChronologyScanResponse = self.call(prompt, None).await?;
        scan.validate(summaries.len())?;
        Ok(scan)
    }

    async fn generate_narrative(
        &self,
        ordered_summaries: &[String],
        context: &NarrativeContext,
    ) -> VisionResult<NarrativeTexts> {
        let prompt = prompts::narrative_prompt(ordered_summaries, context);
        let texts: NarrativeTexts = self.call(prompt, None).await?;
        texts.validate(ordered_summaries.len())?;
        Ok(texts)
    }
}
