//! Generated photobook narrative: cover texts, captions, and chapters.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One narrative chapter covering a contiguous slice of the ordered photos.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Chapter {
    /// Chapter title
    pub title: String,

    /// Emotional tone tag ("nostalgico", "festivo", ...)
    pub tone: String,

    /// Index of the first photo in this chapter (0-based, inclusive)
    pub photo_start: usize,

    /// Index one past the last photo in this chapter (0-based, exclusive)
    pub photo_end: usize,

    /// Chapter-level caption
    pub caption: String,

    /// First page of the chapter (1-based, inclusive)
    pub page_start: u32,

    /// Last page of the chapter (1-based, inclusive)
    pub page_end: u32,
}

impl Chapter {
    /// Number of photos (= pages) the chapter covers.
    pub fn photo_count(&self) -> usize {
        self.photo_end.saturating_sub(self.photo_start)
    }
}

/// The generated narrative for one photobook.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PhotobookStory {
    /// Cover title (short)
    pub cover_title: String,

    /// Cover subtitle
    pub cover_subtitle: String,

    /// Dedication text (2-3 sentences)
    pub dedication: String,

    /// One caption per ordered photo; length always equals the photo count
    pub photo_captions: Vec<String>,

    /// Back-cover text
    pub back_cover_text: String,

    /// Optional closing epilogue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epilogue: Option<String>,

    /// Overall theme tag
    pub theme: String,

    /// Holistic timeline classification used to split chapters
    pub chronology: crate::ChronologyScan,

    /// Ordered chapters; their photo slices partition the photo sequence
    pub chapters: Vec<Chapter>,
}

impl PhotobookStory {
    /// Validate the chapter invariants against a photo count: photo slices
    /// and page ranges are contiguous, 1-based, non-overlapping, and cover
    /// every photo exactly once.
    pub fn validate_chapters(&self, photo_count: usize) -> Result<(), String> {
        if self.chapters.is_empty() {
            return Err("story has no chapters".to_string());
        }
        let mut next_photo = 0usize;
        let mut next_page = 1u32;
        for (i, ch) in self.chapters.iter().enumerate() {
            if ch.photo_start != next_photo {
                return Err(format!(
                    "chapter {} starts at photo {} (expected {})",
                    i, ch.photo_start, next_photo
                ));
            }
            if ch.photo_end <= ch.photo_start {
                return Err(format!("chapter {} covers no photos", i));
            }
            if ch.page_start != next_page {
                return Err(format!(
                    "chapter {} starts at page {} (expected {})",
                    i, ch.page_start, next_page
                ));
            }
            if ch.page_end < ch.page_start {
                return Err(format!(
                    "chapter {} page range {}..{} is inverted",
                    i, ch.page_start, ch.page_end
                ));
            }
            let pages = ch.page_end + 1 - ch.page_start;
            if pages as usize != ch.photo_count() {
                return Err(format!(
                    "chapter {} page span {} does not match photo count {}",
                    i,
                    pages,
                    ch.photo_count()
                ));
            }
            next_photo = ch.photo_end;
            next_page = ch.page_end + 1;
        }
        if next_photo != photo_count {
            return Err(format!(
                "chapters cover {} photos, album has {}",
                next_photo, photo_count
            ));
        }
        Ok(())
    }
}
