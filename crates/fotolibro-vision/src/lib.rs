//! Vision/reasoning capability boundary for the Fotolibro pipeline.
//!
//! The pipeline never calls an AI endpoint directly; it goes through the
//! [`VisionService`] trait. [`GeminiVision`] is the production
//! implementation, [`StubVision`] the deterministic test double, and
//! [`PhotoAnalyzer`] the sequential per-photo adapter with fallback.

mod analyzer;
mod error;
mod gemini;
pub mod prompts;
mod service;
mod stub;

pub use analyzer::{AlbumAnalysis, PhotoAnalyzer, DEFAULT_PHOTO_PAUSE};
pub use error::{VisionError, VisionResult};
pub use gemini::{GeminiVision, VisionConfig, DEFAULT_REQUEST_TIMEOUT};
pub use service::{
    ChronologyScanResponse, MotifDetection, NarrativeContext, NarrativeTexts, PatternDetection,
    PatternKind, PhotoSource, VisionService,
};
pub use stub::StubVision;
