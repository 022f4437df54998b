//! Chronological ordering results.
//!
//! Both the specialized detectors and the holistic chronology scan propose
//! re-orderings of the photo set. A proposed order is only valid if it is a
//! permutation of the input: no photo added, dropped, or duplicated.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::PhotoAnalysis;

/// Which specialized pattern produced the final ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChronologyKind {
    Pregnancy,
    Travel,
    Event,
    #[default]
    Generic,
}

impl ChronologyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pregnancy => "pregnancy",
            Self::Travel => "travel",
            Self::Event => "event",
            Self::Generic => "generic",
        }
    }
}

/// Pattern-specific metadata attached to a detected chronology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChronologyMetadata {
    /// Week-of-pregnancy estimate per ordered photo
    Pregnancy { weeks: Vec<u32> },
    /// Locations visited, in travel order
    Travel { route: Vec<String> },
    /// Phases of a single event ("preparativos", "ceremonia", "fiesta", ...)
    Event { phases: Vec<String> },
    /// No pattern detected
    #[default]
    None,
}

/// Timeline span detected by the holistic chronology scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimelineSpan {
    SingleDay,
    Days,
    Weeks,
    Months,
    Years,
    Decades,
    #[default]
    Unknown,
}

impl TimelineSpan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleDay => "single-day",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
            Self::Decades => "decades",
            Self::Unknown => "unknown",
        }
    }
}

/// Final per-submission ordering decision made by the chronology arbiter.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChronologyResult {
    /// Winning pattern, or `Generic` when no detector reached threshold
    pub detected: ChronologyKind,

    /// Confidence of the winning detector (0 when generic)
    pub confidence: u8,

    /// Photos in their final chronological order
    pub photos: Vec<PhotoAnalysis>,

    /// Pattern-specific metadata from the winning detector
    pub metadata: ChronologyMetadata,
}

/// Holistic timeline classification over the whole (ordered) photo set.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChronologyScan {
    /// Detected timeline span
    pub timeline: TimelineSpan,

    /// Whether the photos show someone aging across the album
    pub age_progression: bool,

    /// Free-text detail about the age progression
    #[serde(default)]
    pub age_details: String,

    /// Whether the photos flow through seasons
    pub seasonal_flow: bool,

    /// Free-text detail about the seasonal flow
    #[serde(default)]
    pub seasonal_details: String,

    /// Description of the narrative arc the scan saw
    #[serde(default)]
    pub narrative_arc: String,

    /// Classifier confidence (0-100)
    pub confidence: u8,
}

impl ChronologyScan {
    /// Fallback scan used when the holistic call fails: unknown timeline,
    /// no progressions, zero confidence.
    pub fn unknown() -> Self {
        Self {
            timeline: TimelineSpan::Unknown,
            age_progression: false,
            age_details: String::new(),
            seasonal_flow: false,
            seasonal_details: String::new(),
            narrative_arc: String::new(),
            confidence: 0,
        }
    }
}

/// Check that `order` is a permutation of `0..len`.
pub fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &idx in order {
        if idx >= len || seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}

/// Apply a (pre-validated) index order to a photo list, returning the
/// reordered clone. Returns `None` if `order` is not a permutation.
pub fn apply_order(photos: &[PhotoAnalysis], order: &[usize]) -> Option<Vec<PhotoAnalysis>> {
    if !is_permutation(order, photos.len()) {
        return None;
    }
    Some(order.iter().map(|&i| photos[i].clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[0, 1, 2], 3));
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(is_permutation(&[], 0));
        // duplicate
        assert!(!is_permutation(&[0, 0, 1], 3));
        // out of range
        assert!(!is_permutation(&[0, 1, 3], 3));
        // wrong length
        assert!(!is_permutation(&[0, 1], 3));
    }

    #[test]
    fn test_apply_order_reorders_and_preserves_multiset() {
        let photos: Vec<_> = ["a.jpg", "b.jpg", "c.jpg"]
            .iter()
            .map(|&n| PhotoAnalysis::fallback(n))
            .collect();
        let reordered = apply_order(&photos, &[2, 0, 1]).unwrap();
        let names: Vec<_> = reordered.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, vec!["c.jpg", "a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_apply_order_rejects_bad_order() {
        let photos: Vec<_> = ["a.jpg", "b.jpg"]
            .iter()
            .map(|&n| PhotoAnalysis::fallback(n))
            .collect();
        assert!(apply_order(&photos, &[1, 1]).is_none());
        assert!(apply_order(&photos, &[0]).is_none());
    }
}
