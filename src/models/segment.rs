// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Colored highlight segments.
//!
//! Segments are independent intervals painted on top of the bar. They may
//! overlap; keeping them disjoint is up to the caller.

use egui::Color32;
use serde::{Deserialize, Serialize};

/// A colored, labelled time interval `[start_time_ms, end_time_ms]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: u32,
    pub label: String,
    pub start_time_ms: i64,
    pub end_time_ms: i64,
    pub color: Color32,
}

impl Segment {
    /// Create a new segment.
    pub fn new(
        id: u32,
        label: impl Into<String>,
        start_time_ms: i64,
        end_time_ms: i64,
        color: Color32,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            start_time_ms,
            end_time_ms,
            color,
        }
    }

    /// Check the segment has a non-negative start and a positive length.
    pub fn is_valid(&self) -> bool {
        self.start_time_ms >= 0 && self.start_time_ms < self.end_time_ms
    }

    /// Check if `position_ms` lies within the segment, both ends included.
    pub fn contains(&self, position_ms: i64) -> bool {
        (self.start_time_ms..=self.end_time_ms).contains(&position_ms)
    }
}

/// Drop invalid segments and sort the rest by start time.
pub fn normalize_segments(segments: Vec<Segment>) -> Vec<Segment> {
    let mut kept: Vec<Segment> = segments
        .into_iter()
        .filter(|s| {
            let valid = s.is_valid();
            if !valid {
                log::debug!(
                    "Dropping segment {} ({}..{})",
                    s.id,
                    s.start_time_ms,
                    s.end_time_ms
                );
            }
            valid
        })
        .collect();
    kept.sort_by_key(|s| s.start_time_ms);
    kept
}

/// Index of the first segment (in start order) containing `position_ms`.
pub fn segment_index_at(segments: &[Segment], position_ms: i64) -> Option<usize> {
    segments.iter().position(|s| s.contains(position_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(id: u32, start: i64, end: i64) -> Segment {
        Segment::new(id, format!("s{id}"), start, end, Color32::YELLOW)
    }

    #[test]
    fn test_invalid_segments_filtered() {
        let kept = normalize_segments(vec![seg(0, 500, 500), seg(1, -1, 10), seg(2, 20, 10)]);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_segments_sorted_by_start() {
        let kept = normalize_segments(vec![seg(0, 5_000, 6_000), seg(1, 1_000, 2_000)]);
        let ids: Vec<u32> = kept.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 0]);
    }

    #[test]
    fn test_segment_resolution() {
        let segments = normalize_segments(vec![seg(0, 1_000, 2_000), seg(1, 5_000, 6_000)]);
        assert_eq!(segment_index_at(&segments, 1_500), Some(0));
        assert_eq!(segment_index_at(&segments, 3_000), None);
        assert_eq!(segment_index_at(&segments, 2_000), Some(0));
        assert_eq!(segment_index_at(&segments, 5_000), Some(1));
    }

    #[test]
    fn test_overlap_first_match_wins() {
        let segments = normalize_segments(vec![seg(7, 1_500, 3_000), seg(3, 1_000, 2_000)]);
        assert_eq!(segments[segment_index_at(&segments, 1_800).unwrap()].id, 3);
    }
}
