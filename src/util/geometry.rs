// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the linear mapping between media time (milliseconds)
//! and horizontal screen coordinates inside a bar rectangle.

use egui::Rect;

/// Fraction (0.0 to 1.0) of the duration reached at `time_ms`.
///
/// Returns 0.0 when `duration_ms` is not positive.
pub fn time_fraction(time_ms: i64, duration_ms: i64) -> f32 {
    if duration_ms <= 0 {
        return 0.0;
    }
    (time_ms as f64 / duration_ms as f64).clamp(0.0, 1.0) as f32
}

/// Convert a time to its x coordinate inside `rect`, clamped to the rect's
/// horizontal extent.
pub fn screen_x(time_ms: i64, duration_ms: i64, rect: Rect) -> f32 {
    let x = rect.left() + rect.width() * time_fraction(time_ms, duration_ms);
    x.max(rect.left()).min(rect.right())
}

/// Exact inverse of [`screen_x`]: the time found at `x` inside `rect`.
pub fn time_at_screen_x(x: f32, duration_ms: i64, rect: Rect) -> i64 {
    if duration_ms <= 0 || rect.width() <= 0.0 {
        return 0;
    }
    let fraction = ((x - rect.left()) / rect.width()).clamp(0.0, 1.0);
    (fraction as f64 * duration_ms as f64).round() as i64
}

/// Time found at `x` after shrinking `rect` by `drag_offset` on both sides.
///
/// The inset lets a pointer reach 0% and 100% without sitting exactly on the
/// physical edge. Falls back to the plain mapping when the inset would leave
/// no width.
pub fn time_at_inset_screen_x(x: f32, duration_ms: i64, rect: Rect, drag_offset: f32) -> i64 {
    let inset_width = rect.width() - drag_offset * 2.0;
    if inset_width <= 0.0 {
        return time_at_screen_x(x, duration_ms, rect);
    }
    let inset = Rect::from_x_y_ranges(
        (rect.left() + drag_offset)..=(rect.right() - drag_offset),
        rect.y_range(),
    );
    time_at_screen_x(x, duration_ms, inset)
}

/// Time span covered by one point of `rect`'s width.
pub fn millis_per_point(duration_ms: i64, rect: Rect) -> f64 {
    if duration_ms <= 0 || rect.width() <= 0.0 {
        return 0.0;
    }
    duration_ms as f64 / rect.width() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn bar() -> Rect {
        Rect::from_min_size(pos2(10.0, 0.0), vec2(400.0, 4.0))
    }

    #[test]
    fn test_screen_x_endpoints() {
        assert_eq!(screen_x(0, 20_000, bar()), 10.0);
        assert_eq!(screen_x(20_000, 20_000, bar()), 410.0);
        assert_eq!(screen_x(10_000, 20_000, bar()), 210.0);
    }

    #[test]
    fn test_screen_x_clamps_out_of_range_times() {
        assert_eq!(screen_x(-500, 20_000, bar()), 10.0);
        assert_eq!(screen_x(25_000, 20_000, bar()), 410.0);
    }

    #[test]
    fn test_screen_x_without_duration() {
        assert_eq!(screen_x(5_000, 0, bar()), 10.0);
        assert_eq!(screen_x(5_000, -1, bar()), 10.0);
    }

    #[test]
    fn test_screen_time_roundtrip() {
        let duration = 600_000;
        let tolerance = millis_per_point(duration, bar());
        for t in (0..=duration).step_by(7_321) {
            let x = screen_x(t, duration, bar());
            let back = time_at_screen_x(x, duration, bar());
            assert!(((back - t) as f64).abs() <= tolerance, "t={t} back={back}");
        }
    }

    #[test]
    fn test_inset_reaches_extremes_before_edges() {
        let duration = 20_000;
        assert_eq!(time_at_inset_screen_x(13.0, duration, bar(), 4.0), 0);
        assert_eq!(time_at_inset_screen_x(407.0, duration, bar(), 4.0), duration);
        assert_eq!(time_at_inset_screen_x(210.0, duration, bar(), 4.0), 10_000);
    }

    #[test]
    fn test_inset_falls_back_on_narrow_rect() {
        let narrow = Rect::from_min_size(pos2(0.0, 0.0), vec2(6.0, 4.0));
        assert_eq!(time_at_inset_screen_x(3.0, 1_000, narrow, 4.0), 500);
    }
}
