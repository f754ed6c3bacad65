// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Chapter data structures.
//!
//! Chapters tile the whole media duration: each one starts where the previous
//! ends, and the first starts at zero.

use serde::{Deserialize, Serialize};

/// A named interval starting at `start_time_ms` and running to the next
/// chapter's start (or the end of the media).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub start_time_ms: i64,
    #[serde(default)]
    pub title: Option<String>,
}

impl Chapter {
    /// Create a chapter with a title.
    pub fn new(start_time_ms: i64, title: impl Into<String>) -> Self {
        Self {
            start_time_ms,
            title: Some(title.into()),
        }
    }

    /// Create a chapter without a title.
    pub fn untitled(start_time_ms: i64) -> Self {
        Self {
            start_time_ms,
            title: None,
        }
    }

    /// Title to display. Untitled chapters show an empty string rather than a
    /// placeholder word, so the preview simply leaves its title line blank.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// Sort chapters by start time and keep them only if they form a valid
/// tiling: more than one entry, with the first starting at zero.
///
/// Any other input collapses to an empty list.
pub fn normalize_chapters(chapters: Vec<Chapter>) -> Vec<Chapter> {
    let mut sorted = chapters;
    sorted.sort_by_key(|c| c.start_time_ms);

    let valid = sorted.len() > 1 && sorted.first().is_some_and(|c| c.start_time_ms == 0);
    if valid {
        sorted
    } else {
        if !sorted.is_empty() {
            log::warn!(
                "Discarding {} chapter(s): list must hold more than one entry starting at 0",
                sorted.len()
            );
        }
        Vec::new()
    }
}

/// Index of the chapter containing `position_ms`: the last one whose start is
/// at or before the position.
pub fn chapter_index_at(chapters: &[Chapter], position_ms: i64) -> Option<usize> {
    let after = chapters.partition_point(|c| c.start_time_ms <= position_ms);
    after.checked_sub(1)
}

/// End time of the chapter at `index`: the next chapter's start, or the
/// duration for the last chapter.
pub fn chapter_end_ms(chapters: &[Chapter], index: usize, duration_ms: i64) -> i64 {
    chapters
        .get(index + 1)
        .map(|next| next.start_time_ms)
        .unwrap_or(duration_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_chapters() -> Vec<Chapter> {
        vec![
            Chapter::new(0, "Intro"),
            Chapter::new(5_000, "Middle"),
            Chapter::new(12_000, "End"),
        ]
    }

    #[test]
    fn test_normalize_sorts() {
        let chapters = normalize_chapters(vec![
            Chapter::new(12_000, "End"),
            Chapter::new(0, "Intro"),
            Chapter::new(5_000, "Middle"),
        ]);
        let starts: Vec<i64> = chapters.iter().map(|c| c.start_time_ms).collect();
        assert_eq!(starts, vec![0, 5_000, 12_000]);
    }

    #[test]
    fn test_normalize_single_chapter_is_dropped() {
        assert!(normalize_chapters(vec![Chapter::new(1_000, "Only")]).is_empty());
        assert!(normalize_chapters(vec![Chapter::new(0, "Only")]).is_empty());
    }

    #[test]
    fn test_normalize_requires_zero_start() {
        let chapters = vec![Chapter::new(1_000, "A"), Chapter::new(5_000, "B")];
        assert!(normalize_chapters(chapters).is_empty());
    }

    #[test]
    fn test_chapter_resolution() {
        let chapters = three_chapters();
        assert_eq!(chapter_index_at(&chapters, 7_000), Some(1));
        assert_eq!(chapter_index_at(&chapters, 0), Some(0));
        assert_eq!(chapter_index_at(&chapters, 19_999), Some(2));
        assert_eq!(chapter_index_at(&chapters, 5_000), Some(1));
        assert_eq!(chapter_index_at(&chapters, 4_999), Some(0));
    }

    #[test]
    fn test_chapter_resolution_before_start_or_empty() {
        assert_eq!(chapter_index_at(&three_chapters(), -1), None);
        assert_eq!(chapter_index_at(&[], 1_000), None);
    }

    #[test]
    fn test_chapter_end() {
        let chapters = three_chapters();
        assert_eq!(chapter_end_ms(&chapters, 0, 20_000), 5_000);
        assert_eq!(chapter_end_ms(&chapters, 2, 20_000), 20_000);
    }

    #[test]
    fn test_display_title() {
        assert_eq!(Chapter::untitled(0).display_title(), "");
        assert_eq!(Chapter::new(0, "Intro").display_title(), "Intro");
    }
}
