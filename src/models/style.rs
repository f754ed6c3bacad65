// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Styling and timing defaults.
//!
//! All sizes are in logical points. Every field has a default, so a style
//! file only needs to name the values it overrides.

use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLAYED_COLOR: Color32 = Color32::from_rgb(0xFF, 0x33, 0x33);
pub const DEFAULT_UNPLAYED_COLOR: Color32 = Color32::from_rgb(0x99, 0x99, 0x99);
pub const DEFAULT_BUFFERED_COLOR: Color32 = Color32::from_rgb(0xEE, 0xEE, 0xEE);
pub const DEFAULT_SCRUBBER_COLOR: Color32 = Color32::from_rgb(0xFF, 0x33, 0x33);

/// Appearance and behavior constants of the time bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeBarStyle {
    pub played_color: Color32,
    pub unplayed_color: Color32,
    pub buffered_color: Color32,
    pub scrubber_color: Color32,

    pub bar_height: f32,
    pub touch_target_height: f32,
    /// Scrubber diameters per state.
    pub scrubber_disabled_size: f32,
    pub scrubber_enabled_size: f32,
    pub scrubber_dragged_size: f32,

    /// Visual spacing between adjacent chapters.
    pub chapter_gap: f32,
    /// Extra height above and below the chapter under the scrubber.
    pub thick_chapter_extra: f32,
    /// Pointer inset that makes 0% and 100% reachable away from the edges.
    pub drag_offset: f32,
    /// Horizontal distance between the seek bounds and the progress bar.
    pub edge_inset: f32,

    pub key_increment_count: u32,
    pub key_stop_timeout_ms: u64,
}

impl Default for TimeBarStyle {
    fn default() -> Self {
        Self {
            played_color: DEFAULT_PLAYED_COLOR,
            unplayed_color: DEFAULT_UNPLAYED_COLOR,
            buffered_color: DEFAULT_BUFFERED_COLOR,
            scrubber_color: DEFAULT_SCRUBBER_COLOR,
            bar_height: 2.0,
            touch_target_height: 26.0,
            scrubber_disabled_size: 4.0,
            scrubber_enabled_size: 12.0,
            scrubber_dragged_size: 24.0,
            chapter_gap: 4.0,
            thick_chapter_extra: 2.0,
            drag_offset: 4.0,
            edge_inset: 3.0,
            key_increment_count: 20,
            key_stop_timeout_ms: 1000,
        }
    }
}

/// Appearance and behavior constants of the preview panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewStyle {
    pub thumbnail_size: Vec2,
    pub title_max_width: f32,
    pub padding_left: f32,
    pub padding_right: f32,
    pub text_min_height: f32,
    pub text_min_height_preview_only: f32,
    pub title_line_height: f32,
    pub time_line_height: f32,
    pub frame_duration_ms: i64,
    pub fade_duration_ms: u64,
}

impl Default for PreviewStyle {
    fn default() -> Self {
        Self {
            thumbnail_size: Vec2::new(160.0, 90.0),
            title_max_width: 200.0,
            padding_left: 0.0,
            padding_right: 0.0,
            text_min_height: 34.0,
            text_min_height_preview_only: 8.0,
            title_line_height: 16.0,
            time_line_height: 18.0,
            frame_duration_ms: 10_000,
            fade_duration_ms: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_style_keeps_defaults() {
        let style: TimeBarStyle = serde_json::from_str(r#"{ "chapter_gap": 6.0 }"#).unwrap();
        assert_eq!(style.chapter_gap, 6.0);
        assert_eq!(style.bar_height, 2.0);
        assert_eq!(style.played_color, DEFAULT_PLAYED_COLOR);
    }

    #[test]
    fn test_preview_style_yaml() {
        let style: PreviewStyle = serde_yaml::from_str("frame_duration_ms: 20000\n").unwrap();
        assert_eq!(style.frame_duration_ms, 20_000);
        assert_eq!(style.thumbnail_size, Vec2::new(160.0, 90.0));
    }
}
