//! Sequential per-photo analysis with graceful degradation.
//!
//! Photos are analyzed one at a time, on purpose: each call receives a
//! compact summary of the analyses produced so far in the same album, which
//! helps the model keep sequence hints and captions coherent. A configurable
//! pause between calls respects the capability's rate limits.
//!
//! Failure of any single photo substitutes [`PhotoAnalysis::fallback`]; this
//! adapter never returns an error past its boundary.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use fotolibro_models::PhotoAnalysis;

use crate::service::{PhotoSource, VisionService};

/// Default pause between consecutive photo calls.
pub const DEFAULT_PHOTO_PAUSE: Duration = Duration::from_secs(1);

/// How many prior analyses are summarized as context for the next call.
const CONTEXT_WINDOW: usize = 8;

/// Result of analyzing a whole album.
#[derive(Debug, Clone)]
pub struct AlbumAnalysis {
    /// One analysis per input photo, in input order. Photos whose analysis
    /// failed carry the neutral fallback.
    pub analyses: Vec<PhotoAnalysis>,

    /// Description of each per-photo failure, for operational telemetry.
    pub failures: Vec<String>,
}

/// Sequential per-photo analysis adapter.
pub struct PhotoAnalyzer {
    service: Arc<dyn VisionService>,
    pause: Duration,
}

impl PhotoAnalyzer {
    pub fn new(service: Arc<dyn VisionService>) -> Self {
        Self {
            service,
            pause: DEFAULT_PHOTO_PAUSE,
        }
    }

    /// Override the inter-photo pause (tests use `Duration::ZERO`).
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Analyze every photo in order. Individual failures degrade to the
    /// neutral fallback analysis; the returned list always has one entry
    /// per input photo.
    pub async fn analyze_album(&self, photos: &[PhotoSource]) -> AlbumAnalysis {
        let mut analyses: Vec<PhotoAnalysis> = Vec::with_capacity(photos.len());
        let mut failures = Vec::new();

        for (i, photo) in photos.iter().enumerate() {
            if i > 0 && !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }

            let context = context_summary(&analyses);
            match self.service.analyze_photo(photo, context.as_deref()).await {
                Ok(analysis) => {
                    info!(
                        photo = %photo.file_name,
                        index = i,
                        emotion = %analysis.emotions.primary,
                        "Photo analyzed"
                    );
                    analyses.push(analysis);
                }
                Err(e) => {
                    warn!(
                        photo = %photo.file_name,
                        index = i,
                        error = %e,
                        "Photo analysis failed, using fallback"
                    );
                    failures.push(format!("{}: {}", photo.file_name, e));
                    analyses.push(PhotoAnalysis::fallback(&photo.file_name));
                }
            }
        }

        AlbumAnalysis { analyses, failures }
    }
}

/// Compact summary of the most recent analyses, for narrative coherence.
fn context_summary(analyses: &[PhotoAnalysis]) -> Option<String> {
    if analyses.is_empty() {
        return None;
    }
    let start = analyses.len().saturating_sub(CONTEXT_WINDOW);
    Some(
        analyses[start..]
            .iter()
            .map(|a| a.summary())
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StubVision;

    fn photos(names: &[&str]) -> Vec<PhotoSource> {
        names
            .iter()
            .map(|n| PhotoSource::new(*n, "image/jpeg", Vec::new()))
            .collect()
    }

    #[tokio::test]
    async fn test_one_analysis_per_photo_in_order() {
        let analyzer =
            PhotoAnalyzer::new(Arc::new(StubVision::new())).with_pause(Duration::ZERO);
        let album = analyzer.analyze_album(&photos(&["a.jpg", "b.jpg", "c.jpg"])).await;
        let names: Vec<_> = album.analyses.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "c.jpg"]);
        assert!(album.failures.is_empty());
    }

    #[tokio::test]
    async fn test_failed_photo_degrades_to_fallback() {
        let stub = StubVision::new().failing_photo("b.jpg");
        let analyzer = PhotoAnalyzer::new(Arc::new(stub)).with_pause(Duration::ZERO);
        let album = analyzer.analyze_album(&photos(&["a.jpg", "b.jpg"])).await;
        assert_eq!(album.analyses.len(), 2);
        assert_eq!(album.analyses[1].narrative.suggested_caption, "b");
        assert_eq!(album.failures.len(), 1);
        assert!(album.failures[0].contains("b.jpg"));
    }

    #[test]
    fn test_context_summary_windows_recent_photos() {
        let analyses: Vec<_> = (0..12)
            .map(|i| PhotoAnalysis::fallback(format!("p{}.jpg", i)))
            .collect();
        let summary = context_summary(&analyses).unwrap();
        assert!(!summary.contains("p3.jpg"));
        assert!(summary.contains("p4.jpg"));
        assert!(summary.contains("p11.jpg"));
        assert!(context_summary(&[]).is_none());
    }
}
