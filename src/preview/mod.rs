// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Floating scrub preview: thumbnail, chapter title and time label.
//!
//! The panel knows nothing about the time bar. The bar pushes scrubber
//! positions, titles and times into it while a scrub is in progress; the
//! host measures text, calls [`PreviewPanel::layout`] every frame and
//! advances the fade with its frame clock.

pub mod fade;
pub mod layout;
pub mod thumbnail;

use crate::error::{Result, TimeBarError};
use crate::models::style::PreviewStyle;
use crate::util::time::format_time;
use egui::{pos2, vec2, Pos2, Rect};
use fade::Fade;
use layout::{place, EdgeClamp, PanelMetrics, Span};
use std::rc::Rc;
use std::time::{Duration, Instant};
use thumbnail::ThumbnailTarget;

/// Host-side callbacks of the preview.
pub trait PreviewListener {
    /// The panel's screen bounding box changed, or became empty when hidden.
    fn on_preview_position_update(&self, _bounding_box: Rect) {}

    /// Fill `target` with the frame at `position_ms`, now or later.
    fn load_thumbnail(&self, target: &ThumbnailTarget, position_ms: i64);

    /// Replace the default time label.
    fn custom_time_text(&self, _position_ms: i64) -> Option<String> {
        None
    }
}

/// Text widths measured by the host with its own fonts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMeasure {
    pub title_width: f32,
    pub time_width: f32,
}

/// Screen rectangles of the panel and its children after a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub panel_rect: Rect,
    pub thumbnail_rect: Rect,
    pub title_rect: Option<Rect>,
    pub time_rect: Option<Rect>,
    pub clamp: EdgeClamp,
}

/// Floating panel shown above the scrubber: a thumbnail with the chapter
/// title and time label, faded in and out with the scrub.
pub struct PreviewPanel {
    /// Sizes, padding and fade timing
    style: PreviewStyle,

    /// Host hooks for thumbnails, positions and time text
    listener: Option<Rc<dyn PreviewListener>>,

    /// Slot the host fills with the current thumbnail
    thumbnail: ThumbnailTarget,

    /// Chapter title shown above the time
    title: String,

    /// Formatted time of the scrub position
    time_text: String,

    /// Whether the title line is laid out
    use_title: bool,

    /// Thumbnail only, without title or time
    preview_only: bool,

    /// Scrubber x the panel is centered on
    last_scrubber_x: f32,

    /// Bounding box last reported to the listener
    last_bounding_box: Option<Rect>,

    /// Position of the last requested thumbnail
    last_loaded_position_ms: Option<i64>,

    /// Time span one thumbnail stands for
    frame_duration_ms: i64,

    /// Left display cutout the panel may slide into
    inset_left: f32,

    /// Right display cutout the panel may slide into
    inset_right: f32,

    /// Whether the panel is shown (including while fading out)
    visible: bool,

    /// Current opacity
    alpha: f32,

    /// Running show or hide animation
    fade: Option<Fade>,

    /// Rectangles from the last layout pass
    last_layout: Option<PanelLayout>,
}

impl Default for PreviewPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewPanel {
    pub fn new() -> Self {
        Self::with_style(PreviewStyle::default())
    }

    pub fn with_style(style: PreviewStyle) -> Self {
        let frame_duration_ms = style.frame_duration_ms.max(1);
        Self {
            style,
            listener: None,
            thumbnail: ThumbnailTarget::new(),
            title: String::new(),
            time_text: String::new(),
            use_title: true,
            preview_only: false,
            last_scrubber_x: 0.0,
            last_bounding_box: None,
            last_loaded_position_ms: None,
            frame_duration_ms,
            inset_left: 0.0,
            inset_right: 0.0,
            visible: false,
            alpha: 0.0,
            fade: None,
            last_layout: None,
        }
    }

    pub fn style(&self) -> &PreviewStyle {
        &self.style
    }

    pub fn set_listener(&mut self, listener: Option<Rc<dyn PreviewListener>>) {
        self.listener = listener;
    }

    /// Let the panel slide into display cutouts of the given widths.
    pub fn adjust_with_display_cutout(&mut self, left: f32, right: f32) {
        self.inset_left = left.max(0.0);
        self.inset_right = right.max(0.0);
    }

    /// Time span one thumbnail stands for. Positions within this distance of
    /// the last loaded one do not request a new thumbnail.
    pub fn set_frame_duration(&mut self, duration_ms: i64) -> Result<()> {
        if duration_ms <= 0 {
            return Err(TimeBarError::InvalidFrameDuration(duration_ms));
        }
        self.frame_duration_ms = duration_ms;
        Ok(())
    }

    pub fn frame_duration(&self) -> i64 {
        self.frame_duration_ms
    }

    /// Show or hide the chapter title line. Showing it turns preview-only
    /// mode off.
    pub fn use_title(&mut self, use_title: bool) {
        self.use_title = use_title;
        if use_title {
            self.use_preview_only(false);
        } else {
            self.title.clear();
        }
    }

    /// Reduce the panel to the thumbnail alone.
    pub fn use_preview_only(&mut self, preview_only: bool) {
        self.preview_only = preview_only;
        if preview_only {
            self.title.clear();
            self.time_text.clear();
        }
    }

    pub fn is_preview_only(&self) -> bool {
        self.preview_only
    }

    pub fn uses_title(&self) -> bool {
        self.use_title
    }

    /// Fade in over the default duration.
    pub fn show(&mut self) {
        self.show_with(Duration::from_millis(self.style.fade_duration_ms));
    }

    /// Fade in, replacing any fade in flight.
    pub fn show_with(&mut self, duration: Duration) {
        let fade = Fade::fade_in(duration);
        self.visible = true;
        self.alpha = fade.initial_alpha();
        self.fade = Some(fade);
    }

    /// Fade out over the default duration.
    pub fn hide(&mut self) {
        self.hide_with(Duration::from_millis(self.style.fade_duration_ms));
    }

    /// Fade out, replacing any fade in flight. The panel turns invisible
    /// once the fade completes.
    pub fn hide_with(&mut self, duration: Duration) {
        let fade = Fade::fade_out(duration);
        self.visible = true;
        self.alpha = fade.initial_alpha();
        self.fade = Some(fade);
    }

    /// Drive the fade. Returns true while an animation is still running.
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(fade) = self.fade.as_mut() else {
            return false;
        };
        let (alpha, done) = fade.sample(now);
        self.alpha = alpha;
        if !done {
            return true;
        }

        let hidden = fade.target_alpha() <= 0.0;
        self.fade = None;
        if hidden {
            self.set_invisible();
        }
        false
    }

    fn set_invisible(&mut self) {
        self.visible = false;
        self.alpha = 0.0;
        self.last_bounding_box = Some(Rect::ZERO);
        if let Some(listener) = &self.listener {
            listener.on_preview_position_update(Rect::ZERO);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_animating(&self) -> bool {
        self.fade.is_some()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_title(&mut self, title: &str) {
        if self.use_title && !self.preview_only {
            title.clone_into(&mut self.title);
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Update the time label for `millis`, honoring the listener's override.
    pub fn set_time(&mut self, millis: i64) {
        if self.preview_only {
            return;
        }
        let custom = self
            .listener
            .as_ref()
            .and_then(|l| l.custom_time_text(millis));
        self.time_text = custom.unwrap_or_else(|| format_time(millis));
    }

    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    pub fn thumbnail(&self) -> &ThumbnailTarget {
        &self.thumbnail
    }

    /// Record the scrubber position and request a thumbnail when the
    /// position left the current frame bucket.
    pub fn update_position(&mut self, scrubber_screen_x: f32, position_ms: i64) {
        self.last_scrubber_x = scrubber_screen_x;
        if self.needs_thumbnail(position_ms) {
            self.last_loaded_position_ms = Some(position_ms);
            self.thumbnail.mark_requested(position_ms);
            if let Some(listener) = &self.listener {
                listener.load_thumbnail(&self.thumbnail, position_ms);
            }
        }
    }

    /// True when nothing was loaded yet or `position_ms` lies outside
    /// `[last - frame, last + frame]`.
    pub fn needs_thumbnail(&self, position_ms: i64) -> bool {
        match self.last_loaded_position_ms {
            None => true,
            Some(last) => (position_ms - last).abs() > self.frame_duration_ms,
        }
    }

    pub fn last_loaded_position(&self) -> Option<i64> {
        self.last_loaded_position_ms
    }

    pub fn last_scrubber_x(&self) -> f32 {
        self.last_scrubber_x
    }

    /// Size the panel from the measured text and place it inside `parent`
    /// with its bottom edge at `bottom`.
    ///
    /// Reports the bounding box (padding excluded) to the listener when it
    /// differs from the last one reported.
    pub fn layout(&mut self, parent: Rect, bottom: f32, text: TextMeasure) -> PanelLayout {
        let metrics = self.measure(parent.width(), text);
        let scrubber_local = self.last_scrubber_x - parent.left();
        let placement = place(&metrics, scrubber_local, self.inset_left, self.inset_right);

        let thumb_size = self.style.thumbnail_size;
        let text_height = self.text_height();
        let panel_height = thumb_size.y + text_height;
        let origin = pos2(parent.left() + placement.panel_x, bottom - panel_height);

        let panel_rect = Rect::from_min_size(origin, vec2(metrics.panel_width, panel_height));
        let thumbnail_rect = Rect::from_min_size(
            origin + vec2(placement.thumbnail_x, 0.0),
            thumb_size,
        );

        let title_width = self.clamped_title_width(text.title_width);
        let title_rect = self.shows_title().then(|| {
            let left = metrics.text.left + (metrics.text.width - title_width) / 2.0;
            Rect::from_min_size(
                origin + vec2(left, thumb_size.y),
                vec2(title_width, self.style.title_line_height),
            )
        });
        let time_rect = (!self.preview_only).then(|| {
            let top = thumb_size.y
                + if self.shows_title() {
                    self.style.title_line_height
                } else {
                    0.0
                };
            Rect::from_min_size(
                origin + vec2(placement.time_label_x, top),
                vec2(metrics.time_label.width, self.style.time_line_height),
            )
        });

        let layout = PanelLayout {
            panel_rect,
            thumbnail_rect,
            title_rect,
            time_rect,
            clamp: placement.clamp,
        };
        self.last_layout = Some(layout);
        self.report_bounding_box(panel_rect);
        layout
    }

    pub fn last_layout(&self) -> Option<PanelLayout> {
        self.last_layout
    }

    fn report_bounding_box(&mut self, panel_rect: Rect) {
        if !self.visible {
            return;
        }
        let bounding_box = Rect::from_min_max(
            Pos2::new(panel_rect.left() + self.style.padding_left, panel_rect.top()),
            Pos2::new(panel_rect.right() - self.style.padding_right, panel_rect.bottom()),
        );
        if self.last_bounding_box == Some(bounding_box) {
            return;
        }
        self.last_bounding_box = Some(bounding_box);
        if let Some(listener) = &self.listener {
            listener.on_preview_position_update(bounding_box);
        }
    }

    fn shows_title(&self) -> bool {
        self.use_title && !self.preview_only
    }

    fn clamped_title_width(&self, measured: f32) -> f32 {
        measured.max(0.0).min(self.style.title_max_width)
    }

    fn text_height(&self) -> f32 {
        if self.preview_only {
            return self.style.text_min_height_preview_only;
        }
        let title = if self.shows_title() {
            self.style.title_line_height
        } else {
            0.0
        };
        (title + self.style.time_line_height).max(self.style.text_min_height)
    }

    /// Natural (unclamped) child positions: thumbnail and text block are
    /// centered in the content area, the time label in the text block.
    fn measure(&self, parent_width: f32, text: TextMeasure) -> PanelMetrics {
        let thumb_width = self.style.thumbnail_size.x;
        let time_width = if self.preview_only { 0.0 } else { text.time_width.max(0.0) };
        let title_width = if self.shows_title() {
            self.clamped_title_width(text.title_width)
        } else {
            0.0
        };
        let text_width = title_width.max(time_width);
        let content_width = thumb_width.max(text_width);

        let pad = self.style.padding_left;
        let text_left = pad + (content_width - text_width) / 2.0;
        PanelMetrics {
            parent_width,
            panel_width: pad + content_width + self.style.padding_right,
            thumbnail: Span::new(pad + (content_width - thumb_width) / 2.0, thumb_width),
            text: Span::new(text_left, text_width),
            time_label: Span::new(pad + (content_width - time_width) / 2.0, time_width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        loads: RefCell<Vec<i64>>,
        boxes: RefCell<Vec<Rect>>,
    }

    impl PreviewListener for Recorder {
        fn on_preview_position_update(&self, bounding_box: Rect) {
            self.boxes.borrow_mut().push(bounding_box);
        }

        fn load_thumbnail(&self, _target: &ThumbnailTarget, position_ms: i64) {
            self.loads.borrow_mut().push(position_ms);
        }
    }

    fn panel_with_recorder() -> (PreviewPanel, Rc<Recorder>) {
        let recorder = Rc::new(Recorder::default());
        let mut panel = PreviewPanel::new();
        panel.set_listener(Some(recorder.clone()));
        (panel, recorder)
    }

    fn viewport() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(1000.0, 600.0))
    }

    #[test]
    fn test_thumbnail_throttle() {
        let (mut panel, recorder) = panel_with_recorder();
        panel.update_position(0.0, 50_000);
        panel.update_position(0.0, 55_000);
        panel.update_position(0.0, 60_000);
        assert_eq!(*recorder.loads.borrow(), vec![50_000]);

        panel.update_position(0.0, 61_000);
        assert_eq!(*recorder.loads.borrow(), vec![50_000, 61_000]);
        assert_eq!(panel.thumbnail().requested_position(), Some(61_000));
    }

    #[test]
    fn test_throttle_backwards() {
        let (mut panel, recorder) = panel_with_recorder();
        panel.update_position(0.0, 50_000);
        panel.update_position(0.0, 39_999);
        assert_eq!(*recorder.loads.borrow(), vec![50_000, 39_999]);
    }

    #[test]
    fn test_frame_duration_rejects_non_positive() {
        let mut panel = PreviewPanel::new();
        assert_eq!(
            panel.set_frame_duration(0),
            Err(TimeBarError::InvalidFrameDuration(0))
        );
        assert!(panel.set_frame_duration(20_000).is_ok());
        assert_eq!(panel.frame_duration(), 20_000);
    }

    #[test]
    fn test_hide_reports_empty_box_on_completion() {
        let (mut panel, recorder) = panel_with_recorder();
        let start = Instant::now();
        panel.show_with(Duration::ZERO);
        panel.advance(start);
        assert!(panel.is_visible());
        assert_eq!(panel.alpha(), 1.0);

        panel.hide_with(Duration::from_millis(300));
        assert!(panel.advance(start));
        assert!(panel.is_visible());
        assert!(!panel.advance(start + Duration::from_millis(300)));
        assert!(!panel.is_visible());
        assert_eq!(*recorder.boxes.borrow(), vec![Rect::ZERO]);
    }

    #[test]
    fn test_show_cancels_hide_in_flight() {
        let mut panel = PreviewPanel::new();
        let start = Instant::now();
        panel.hide_with(Duration::from_millis(300));
        panel.advance(start);
        panel.advance(start + Duration::from_millis(100));
        panel.show_with(Duration::from_millis(300));
        assert_eq!(panel.alpha(), 0.0);

        panel.advance(start + Duration::from_millis(200));
        panel.advance(start + Duration::from_millis(600));
        assert!(panel.is_visible());
        assert_eq!(panel.alpha(), 1.0);
        assert!(!panel.is_animating());
    }

    #[test]
    fn test_layout_reports_box_once_per_change() {
        let (mut panel, recorder) = panel_with_recorder();
        panel.show_with(Duration::ZERO);
        panel.update_position(500.0, 0);
        let text = TextMeasure {
            title_width: 120.0,
            time_width: 40.0,
        };

        let first = panel.layout(viewport(), 560.0, text);
        panel.layout(viewport(), 560.0, text);
        assert_eq!(recorder.boxes.borrow().len(), 1);
        assert_eq!(first.panel_rect.center().x, 500.0);
        assert_eq!(first.panel_rect.bottom(), 560.0);

        panel.update_position(520.0, 0);
        panel.layout(viewport(), 560.0, text);
        assert_eq!(recorder.boxes.borrow().len(), 2);
    }

    #[test]
    fn test_layout_at_left_edge_slides_thumbnail() {
        let mut panel = PreviewPanel::new();
        panel.show_with(Duration::ZERO);
        panel.set_title("A long chapter title");
        panel.update_position(0.0, 0);
        let text = TextMeasure {
            title_width: 400.0,
            time_width: 40.0,
        };

        let layout = panel.layout(viewport(), 560.0, text);
        assert_eq!(layout.clamp, EdgeClamp::Left);
        assert_eq!(layout.panel_rect.left(), 0.0);
        // Title is capped at 200, so the thumbnail's natural left is 20.
        assert_eq!(layout.panel_rect.width(), 200.0);
        assert_eq!(layout.thumbnail_rect.left(), 0.0);
        let time = layout.time_rect.unwrap();
        assert_eq!(time.center().x, layout.thumbnail_rect.center().x);
    }

    #[test]
    fn test_preview_only_drops_text() {
        let mut panel = PreviewPanel::new();
        panel.set_title("Intro");
        panel.set_time(65_000);
        panel.use_preview_only(true);
        assert_eq!(panel.title(), "");
        assert_eq!(panel.time_text(), "");

        panel.set_time(70_000);
        assert_eq!(panel.time_text(), "");

        let layout = panel.layout(viewport(), 560.0, TextMeasure::default());
        assert!(layout.title_rect.is_none());
        assert!(layout.time_rect.is_none());
        assert_eq!(layout.panel_rect.height(), 98.0);

        panel.use_title(true);
        assert!(!panel.is_preview_only());
    }

    #[test]
    fn test_custom_time_text() {
        struct Custom;
        impl PreviewListener for Custom {
            fn load_thumbnail(&self, _target: &ThumbnailTarget, _position_ms: i64) {}
            fn custom_time_text(&self, position_ms: i64) -> Option<String> {
                Some(format!("frame {}", position_ms / 40))
            }
        }

        let mut panel = PreviewPanel::new();
        panel.set_time(65_000);
        assert_eq!(panel.time_text(), "1:05");
        panel.set_listener(Some(Rc::new(Custom)));
        panel.set_time(400);
        assert_eq!(panel.time_text(), "frame 10");
    }

    #[test]
    fn test_cutout_insets_clamp_negative() {
        let mut panel = PreviewPanel::new();
        panel.show_with(Duration::ZERO);
        panel.adjust_with_display_cutout(-5.0, 12.0);
        panel.update_position(0.0, 0);
        let layout = panel.layout(viewport(), 560.0, TextMeasure::default());
        assert_eq!(layout.panel_rect.left(), 0.0);

        panel.update_position(1000.0, 0);
        let layout = panel.layout(viewport(), 560.0, TextMeasure::default());
        assert_eq!(layout.panel_rect.right(), 1012.0);
    }
}
