//! Pipeline configuration.

use std::time::Duration;

/// Confidence (0-100) a detector must reach to be trusted. Shared by motif
/// detection and all three specialized chronology detectors; the source
/// system gives no per-domain tuning, so neither do we.
pub const DEFAULT_CONFIDENCE_THRESHOLD: u8 = 70;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Minimum confidence for motif/pattern detections to be trusted
    pub confidence_threshold: u8,

    /// Pause between consecutive per-photo vision calls (rate limiting)
    pub photo_pause: Duration,

    /// Seed for the randomized choices (album title, back-cover quote).
    /// `None` means draw from entropy; tests fix it for determinism.
    pub rng_seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            photo_pause: fotolibro_vision::DEFAULT_PHOTO_PAUSE,
            rng_seed: None,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// * `PIPELINE_CONFIDENCE_THRESHOLD` - detection threshold (0-100)
    /// * `PIPELINE_PHOTO_PAUSE_MS` - pause between photo calls
    /// * `PIPELINE_RNG_SEED` - fixed seed for reproducible runs
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let confidence_threshold = std::env::var("PIPELINE_CONFIDENCE_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v| *v <= 100)
            .unwrap_or(defaults.confidence_threshold);

        let photo_pause = std::env::var("PIPELINE_PHOTO_PAUSE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.photo_pause);

        let rng_seed = std::env::var("PIPELINE_RNG_SEED")
            .ok()
            .and_then(|v| v.parse().ok());

        Self {
            confidence_threshold,
            photo_pause,
            rng_seed,
        }
    }

    /// Config suited to tests: no pauses, fixed seed.
    pub fn for_tests() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            photo_pause: Duration::ZERO,
            rng_seed: Some(42),
        }
    }
}
