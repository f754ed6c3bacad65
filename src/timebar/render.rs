// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Draw list for the bar.
//!
//! [`TimeBar::render_plan`] describes what to paint, back to front, without
//! touching a painter. Order: the two edge caps, then either the plain
//! unplayed/buffered/played fills or the per-chapter fills, then segment
//! overlays, then the scrubber.

use super::TimeBar;
use crate::models::chapter::chapter_index_at;
use crate::util::geometry::screen_x;
use egui::{pos2, Color32, Pos2, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillKind {
    Unplayed,
    Buffered,
    Played,
    Segment,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillRegion {
    pub rect: Rect,
    pub kind: FillKind,
    pub color: Color32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubberCircle {
    pub center: Pos2,
    pub radius: f32,
    pub color: Color32,
}

/// Everything needed to paint one frame of the bar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderPlan {
    pub regions: Vec<FillRegion>,
    pub scrubber: Option<ScrubberCircle>,
}

impl RenderPlan {
    fn push(&mut self, left: f32, right: f32, top: f32, bottom: f32, kind: FillKind, color: Color32) {
        if right <= left {
            return;
        }
        self.regions.push(FillRegion {
            rect: Rect::from_min_max(pos2(left, top), pos2(right, bottom)),
            kind,
            color,
        });
    }
}

impl TimeBar {
    /// Build the draw list for the current state.
    ///
    /// Without a valid duration the plan is a single unplayed strip and no
    /// scrubber.
    pub fn render_plan(&self) -> RenderPlan {
        let mut plan = RenderPlan::default();
        let style = &self.style;
        let seek = self.seek_rect;
        let progress = self.progress_rect;
        let (top, bottom) = (progress.top(), progress.bottom());

        let Some(duration) = self.valid_duration() else {
            plan.push(seek.left(), seek.right(), top, bottom, FillKind::Unplayed, style.unplayed_color);
            return plan;
        };

        plan.push(seek.left(), progress.left(), top, bottom, FillKind::Played, style.played_color);
        let (end_kind, end_color) = if self.position_ms >= duration {
            (FillKind::Played, style.played_color)
        } else {
            (FillKind::Unplayed, style.unplayed_color)
        };
        plan.push(progress.right(), seek.right(), top, bottom, end_kind, end_color);

        if self.gap_segments.is_empty() {
            self.plan_plain_fills(&mut plan, duration);
        } else {
            self.plan_chapter_fills(&mut plan, duration);
        }

        for segment in &self.segments {
            plan.push(
                screen_x(segment.start_time_ms, duration, progress),
                screen_x(segment.end_time_ms, duration, progress),
                top,
                bottom,
                FillKind::Segment,
                segment.color,
            );
        }

        if self.show_scrubber {
            plan.scrubber = Some(ScrubberCircle {
                center: pos2(self.scrubber_x(), progress.center().y),
                radius: self.scrubber_radius(),
                color: style.scrubber_color,
            });
        }
        plan
    }

    /// Rect fills would map onto: the seek bounds while scrubbing, the
    /// progress bar otherwise.
    fn fill_rect(&self) -> Rect {
        if self.scrub.is_scrubbing {
            self.seek_rect
        } else {
            self.progress_rect
        }
    }

    fn plan_plain_fills(&self, plan: &mut RenderPlan, duration: i64) {
        let style = &self.style;
        let fill = self.fill_rect();
        let (top, bottom) = (self.progress_rect.top(), self.progress_rect.bottom());
        let left = fill.left();

        let buffered_x = screen_x(self.buffered_position_ms, duration, fill);
        plan.push(left, self.progress_rect.right(), top, bottom, FillKind::Unplayed, style.unplayed_color);
        plan.push(left, buffered_x, top, bottom, FillKind::Buffered, style.buffered_color);
        plan.push(left, self.displayed_screen_x(), top, bottom, FillKind::Played, style.played_color);
    }

    fn plan_chapter_fills(&self, plan: &mut RenderPlan, duration: i64) {
        let style = &self.style;
        let fill = self.fill_rect();
        let (top, bottom) = (self.progress_rect.top(), self.progress_rect.bottom());
        let played_x = self.displayed_screen_x();
        let buffered_x = screen_x(self.buffered_position_ms, duration, fill);
        let displayed = self.displayed_position();
        let thick_index = self
            .scrub
            .is_scrubbing
            .then(|| self.chapter_index_at_scrub())
            .flatten();

        for (index, gap) in self.gap_segments.iter().enumerate() {
            let (start, end) = (gap.start_screen_x, gap.end_screen_x);
            plan.push(start, end, top, bottom, FillKind::Unplayed, style.unplayed_color);

            if self.scrub.is_scrubbing {
                let thick = thick_index == Some(index);
                let extra = if thick { style.thick_chapter_extra } else { 0.0 };
                let (t, b) = (top - extra, bottom + extra);
                if thick {
                    plan.push(start, end, t, b, FillKind::Buffered, style.buffered_color);
                }
                if displayed >= gap.start_time_ms {
                    plan.push(start, played_x.min(end), t, b, FillKind::Played, style.played_color);
                }
            } else {
                if self.buffered_position_ms >= gap.start_time_ms {
                    let right = buffered_x.clamp(start, end.max(start));
                    plan.push(start, right, top, bottom, FillKind::Buffered, style.buffered_color);
                }
                if displayed >= gap.start_time_ms {
                    plan.push(start, played_x.min(end), top, bottom, FillKind::Played, style.played_color);
                }
            }
        }
    }

    fn chapter_index_at_scrub(&self) -> Option<usize> {
        chapter_index_at(&self.chapters, self.scrub.scrub_position_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{bar_with_recorder, three_chapters};
    use super::*;
    use crate::models::segment::Segment;

    fn kinds(plan: &RenderPlan) -> Vec<FillKind> {
        plan.regions.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn test_plan_without_duration() {
        let (mut bar, _) = bar_with_recorder();
        bar.show_scrubber();
        bar.set_duration(None);
        let plan = bar.render_plan();
        assert_eq!(kinds(&plan), vec![FillKind::Unplayed]);
        assert_eq!(plan.regions[0].rect.left(), 0.0);
        assert_eq!(plan.regions[0].rect.right(), 406.0);
        assert!(plan.scrubber.is_none());
    }

    #[test]
    fn test_plain_fill_order() {
        let (mut bar, _) = bar_with_recorder();
        bar.tick(5_000, 10_000, Some(20_000));
        let plan = bar.render_plan();
        assert_eq!(
            kinds(&plan),
            vec![
                FillKind::Played,
                FillKind::Unplayed,
                FillKind::Unplayed,
                FillKind::Buffered,
                FillKind::Played,
            ]
        );
        assert_eq!(plan.regions[3].rect.right(), 203.0);
        assert_eq!(plan.regions[4].rect.right(), 103.0);
        assert!(plan.scrubber.is_none());
    }

    #[test]
    fn test_end_cap_played_at_end() {
        let (mut bar, _) = bar_with_recorder();
        bar.set_position(20_000);
        let plan = bar.render_plan();
        assert_eq!(plan.regions[1].kind, FillKind::Played);
        assert_eq!(plan.regions[1].rect.left(), 403.0);
    }

    #[test]
    fn test_segments_paint_last_then_scrubber() {
        let (mut bar, _) = bar_with_recorder();
        bar.show_scrubber();
        bar.set_segments(vec![Segment::new(1, "a", 5_000, 10_000, Color32::YELLOW)]);
        let plan = bar.render_plan();

        let last = plan.regions.last().unwrap();
        assert_eq!(last.kind, FillKind::Segment);
        assert_eq!(last.color, Color32::YELLOW);
        assert_eq!(last.rect.left(), 103.0);
        assert_eq!(last.rect.right(), 203.0);

        let scrubber = plan.scrubber.unwrap();
        assert_eq!(scrubber.radius, 6.0);
        assert_eq!(scrubber.center.y, 13.0);
    }

    #[test]
    fn test_chapter_fills_respect_gaps() {
        let (mut bar, _) = bar_with_recorder();
        bar.set_chapters(three_chapters());
        bar.tick(6_000, 6_000, Some(20_000));
        let plan = bar.render_plan();

        let played: Vec<&FillRegion> = plan
            .regions
            .iter()
            .filter(|r| r.kind == FillKind::Played)
            .collect();
        // Start cap, first chapter full, second chapter partial.
        assert_eq!(played.len(), 3);
        assert!((played[1].rect.right() - 103.0).abs() < 0.001);
        assert!((played[2].rect.left() - 107.0).abs() < 0.001);
        assert!((played[2].rect.right() - 123.0).abs() < 0.001);
        assert!(plan.regions.iter().all(|r| r.rect.height() == 2.0));
    }

    #[test]
    fn test_scrubbed_chapter_is_thick() {
        let (mut bar, _) = bar_with_recorder();
        bar.set_chapters(three_chapters());
        bar.start_scrubbing(7_000);
        let plan = bar.render_plan();

        let thick: Vec<&FillRegion> = plan
            .regions
            .iter()
            .filter(|r| r.rect.height() > 2.0)
            .collect();
        assert!(!thick.is_empty());
        for region in &thick {
            assert_eq!(region.rect.height(), 6.0);
            assert!(region.rect.left() >= bar.gap_segments()[1].start_screen_x);
            assert!(region.rect.right() <= bar.gap_segments()[1].end_screen_x);
        }
        assert_eq!(thick[0].kind, FillKind::Buffered);
    }
}
