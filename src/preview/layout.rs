// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Horizontal placement of the preview panel.
//!
//! The panel centers itself on the scrubber and is clamped to the parent
//! viewport, widened by the display cutout insets. While clamped at an edge,
//! a thumbnail narrower than the text block slides inside the panel to stay
//! under the scrubber, and the time label follows the thumbnail.

/// Horizontal extent of a child, relative to the panel's left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub left: f32,
    pub width: f32,
}

impl Span {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn center(&self) -> f32 {
        self.left + self.width / 2.0
    }
}

/// Measured sizes the placement works from. Child spans are the natural
/// (unclamped) positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelMetrics {
    pub parent_width: f32,
    pub panel_width: f32,
    pub thumbnail: Span,
    pub text: Span,
    pub time_label: Span,
}

/// Which edge, if any, the panel is pinned against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeClamp {
    None,
    Left,
    Right,
}

/// Result of a placement: the panel's x in parent coordinates and its
/// children's x relative to the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub panel_x: f32,
    pub thumbnail_x: f32,
    pub time_label_x: f32,
    pub clamp: EdgeClamp,
}

/// Place the panel for a scrubber at `scrubber_x` (parent coordinates).
///
/// When the panel is wider than the viewport the two bounds cross; the left
/// bound wins.
pub fn place(metrics: &PanelMetrics, scrubber_x: f32, inset_left: f32, inset_right: f32) -> Placement {
    let min_x = metrics.thumbnail.left.min(metrics.text.left) - inset_left;
    let max_x = metrics.parent_width - metrics.panel_width + inset_right;
    let centered = scrubber_x - metrics.panel_width / 2.0;
    let panel_x = centered.min(max_x).max(min_x);

    let clamp = if panel_x == min_x {
        EdgeClamp::Left
    } else if panel_x == max_x {
        EdgeClamp::Right
    } else {
        EdgeClamp::None
    };

    let slides = clamp != EdgeClamp::None && metrics.thumbnail.width < metrics.text.width;
    if !slides {
        return Placement {
            panel_x,
            thumbnail_x: metrics.thumbnail.left,
            time_label_x: metrics.time_label.left,
            clamp,
        };
    }

    let thumb_width = metrics.thumbnail.width;
    let lowest = metrics.thumbnail.left.min(metrics.text.left);
    let highest = (metrics.panel_width - thumb_width)
        .min(metrics.text.right() - thumb_width)
        .max(lowest);
    let thumbnail_x = (scrubber_x - panel_x - thumb_width / 2.0)
        .max(lowest)
        .min(highest);
    let time_label_x = thumbnail_x + thumb_width / 2.0 - metrics.time_label.width / 2.0;

    Placement {
        panel_x,
        thumbnail_x,
        time_label_x,
        clamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 160 wide thumbnail centered over a 300 wide text block.
    fn wide_text() -> PanelMetrics {
        PanelMetrics {
            parent_width: 1000.0,
            panel_width: 300.0,
            thumbnail: Span::new(70.0, 160.0),
            text: Span::new(0.0, 300.0),
            time_label: Span::new(125.0, 50.0),
        }
    }

    #[test]
    fn test_centered_when_room() {
        let p = place(&wide_text(), 500.0, 0.0, 0.0);
        assert_eq!(p.clamp, EdgeClamp::None);
        assert_eq!(p.panel_x, 350.0);
        assert_eq!(p.thumbnail_x, 70.0);
        assert_eq!(p.time_label_x, 125.0);
    }

    #[test]
    fn test_left_clamp_slides_thumbnail() {
        let p = place(&wide_text(), 40.0, 0.0, 0.0);
        assert_eq!(p.clamp, EdgeClamp::Left);
        assert_eq!(p.panel_x, 0.0);
        // Thumbnail cannot go left of the panel content.
        assert_eq!(p.thumbnail_x, 0.0);
        assert_eq!(p.time_label_x, 55.0);

        let p = place(&wide_text(), 100.0, 0.0, 0.0);
        assert_eq!(p.thumbnail_x, 20.0);
        assert_eq!(p.time_label_x, 75.0);
    }

    #[test]
    fn test_right_clamp_slides_thumbnail() {
        let p = place(&wide_text(), 960.0, 0.0, 0.0);
        assert_eq!(p.clamp, EdgeClamp::Right);
        assert_eq!(p.panel_x, 700.0);
        assert_eq!(p.thumbnail_x, 140.0);

        let p = place(&wide_text(), 900.0, 0.0, 0.0);
        assert_eq!(p.thumbnail_x, 120.0);
        assert_eq!(p.time_label_x, 175.0);
    }

    #[test]
    fn test_cutout_insets_widen_bounds() {
        let p = place(&wide_text(), 0.0, 24.0, 0.0);
        assert_eq!(p.panel_x, -24.0);
        assert_eq!(p.clamp, EdgeClamp::Left);

        let p = place(&wide_text(), 1000.0, 0.0, 30.0);
        assert_eq!(p.panel_x, 730.0);
        assert_eq!(p.clamp, EdgeClamp::Right);
    }

    #[test]
    fn test_panel_wider_than_viewport_pins_left() {
        let mut metrics = wide_text();
        metrics.parent_width = 200.0;
        let p = place(&metrics, 0.0, 10.0, 0.0);
        assert_eq!(p.clamp, EdgeClamp::Left);
        assert_eq!(p.panel_x, -10.0);
        // Recentred toward x = 0 instead of the natural 70.
        assert_eq!(p.thumbnail_x, 0.0);
        assert!(p.thumbnail_x < metrics.thumbnail.left);
    }

    #[test]
    fn test_wide_thumbnail_never_slides() {
        let metrics = PanelMetrics {
            parent_width: 1000.0,
            panel_width: 160.0,
            thumbnail: Span::new(0.0, 160.0),
            text: Span::new(30.0, 100.0),
            time_label: Span::new(55.0, 50.0),
        };
        let p = place(&metrics, 5.0, 0.0, 0.0);
        assert_eq!(p.clamp, EdgeClamp::Left);
        assert_eq!(p.thumbnail_x, 0.0);
        assert_eq!(p.time_label_x, 55.0);
    }
}
