// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Chapter segments with their gap-aware screen positions.
//!
//! Computed once per chapter, duration or layout change so drawing does not
//! repeat the time to pixel mapping.

use crate::models::chapter::{chapter_end_ms, Chapter};
use crate::util::geometry::screen_x;
use egui::Rect;

/// One chapter's interval with its pre-computed horizontal extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapSegment {
    pub start_time_ms: i64,
    pub end_time_ms: i64,
    pub start_screen_x: f32,
    pub end_screen_x: f32,
}

impl GapSegment {
    pub fn width(&self) -> f32 {
        self.end_screen_x - self.start_screen_x
    }
}

/// Lay the chapters out on the bar.
///
/// The first segment starts at the seek bounds' left edge and the last ends
/// at their right edge. Every other boundary is mapped onto the progress bar,
/// and all chapters but the first are inset by `gap` on their start side.
pub fn compute_gap_segments(
    chapters: &[Chapter],
    duration_ms: i64,
    seek_rect: Rect,
    progress_rect: Rect,
    gap: f32,
) -> Vec<GapSegment> {
    if chapters.is_empty() || duration_ms <= 0 {
        return Vec::new();
    }

    let last = chapters.len() - 1;
    chapters
        .iter()
        .enumerate()
        .map(|(index, chapter)| {
            let start_time_ms = chapter.start_time_ms;
            let end_time_ms = chapter_end_ms(chapters, index, duration_ms);

            let start_screen_x = if index == 0 {
                seek_rect.left()
            } else {
                screen_x(start_time_ms, duration_ms, progress_rect) + gap
            };
            let end_screen_x = if index == last {
                seek_rect.right()
            } else {
                screen_x(end_time_ms, duration_ms, progress_rect)
            };

            GapSegment {
                start_time_ms,
                end_time_ms,
                start_screen_x,
                end_screen_x,
            }
        })
        .collect()
}
