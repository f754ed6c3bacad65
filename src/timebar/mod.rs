// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The seek bar core.
//!
//! [`TimeBar`] owns the playback state pushed in by the host, the chapter and
//! segment lists, the scrub state machine and the time to pixel geometry.
//! Input handling lives in [`input`], the draw list in [`render`].

pub mod gaps;
pub mod input;
pub mod listeners;
pub mod render;

use crate::models::chapter::{chapter_index_at, normalize_chapters, Chapter};
use crate::models::segment::{normalize_segments, segment_index_at, Segment};
use crate::models::style::TimeBarStyle;
use crate::preview::PreviewPanel;
use crate::util::geometry::screen_x;
use crate::util::time::format_time;
use egui::{pos2, Rect};
use gaps::{compute_gap_segments, GapSegment};
use listeners::{Listeners, ScrubListener, SegmentListener};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Lower bound for the host's polling interval.
pub const MIN_UPDATE_INTERVAL_MS: u64 = 200;
/// Upper bound for the host's polling interval.
pub const MAX_UPDATE_INTERVAL_MS: u64 = 1000;

/// Clamp a [`TimeBar::preferred_update_delay`] into the host's polling range.
pub fn clamp_update_delay(delay: Duration) -> Duration {
    delay.clamp(
        Duration::from_millis(MIN_UPDATE_INTERVAL_MS),
        Duration::from_millis(MAX_UPDATE_INTERVAL_MS),
    )
}

/// Scrub gesture state. The scrub position is only meaningful while
/// `is_scrubbing` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrubState {
    pub is_scrubbing: bool,
    pub scrub_position_ms: i64,
}

/// How far one directional key press moves the scrub position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIncrement {
    /// A fraction of the duration: `duration / count`.
    Count(u32),
    /// A fixed time step.
    Time(i64),
}

/// Seek bar state: playback values pushed by the host, chapter and segment
/// markers, and the scrub gesture in progress.
pub struct TimeBar {
    /// Colors, sizes and timings
    style: TimeBarStyle,

    /// Full touch target; scrubs map onto this
    seek_rect: Rect,

    /// Inset bar the fills are drawn on; playback maps onto this
    progress_rect: Rect,

    /// Last playback position from the host
    position_ms: i64,

    /// Last buffered position from the host
    buffered_position_ms: i64,

    /// Media duration (`None` while nothing is loaded)
    duration_ms: Option<i64>,

    /// Normalized chapters, empty when none are shown
    chapters: Vec<Chapter>,

    /// Valid segments sorted by start
    segments: Vec<Segment>,

    /// Screen extents of the chapters, refreshed on chapter, duration or layout change
    gap_segments: Vec<GapSegment>,

    /// Chapter last reported to the segment listeners
    current_chapter: Option<Chapter>,

    /// Segment last reported to the segment listeners
    current_segment: Option<Segment>,

    /// Scrub gesture in progress
    scrub: ScrubState,

    /// Whether a gesture holds the pointer
    pressed: bool,

    /// Whether input is accepted
    enabled: bool,

    /// Whether the bar has keyboard focus
    focused: bool,

    /// Whether the scrubber circle is drawn
    show_scrubber: bool,

    /// Step applied per directional key press
    key_increment: KeyIncrement,

    /// When a pending key scrub commits on its own
    auto_stop_deadline: Option<Instant>,

    /// Scrub start/move/stop listeners, in registration order
    scrub_listeners: Listeners<dyn ScrubListener>,

    /// Chapter and segment change listeners, in registration order
    segment_listeners: Listeners<dyn SegmentListener>,

    /// Preview panel driven during scrubs
    preview: Option<Rc<RefCell<PreviewPanel>>>,
}

impl Default for TimeBar {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeBar {
    pub fn new() -> Self {
        Self::with_style(TimeBarStyle::default())
    }

    pub fn with_style(style: TimeBarStyle) -> Self {
        let key_increment = KeyIncrement::Count(style.key_increment_count.max(1));
        Self {
            style,
            seek_rect: Rect::NOTHING,
            progress_rect: Rect::NOTHING,
            position_ms: 0,
            buffered_position_ms: 0,
            duration_ms: None,
            chapters: Vec::new(),
            segments: Vec::new(),
            gap_segments: Vec::new(),
            current_chapter: None,
            current_segment: None,
            scrub: ScrubState::default(),
            pressed: false,
            enabled: true,
            focused: false,
            show_scrubber: false,
            key_increment,
            auto_stop_deadline: None,
            scrub_listeners: Listeners::default(),
            segment_listeners: Listeners::default(),
            preview: None,
        }
    }

    pub fn style(&self) -> &TimeBarStyle {
        &self.style
    }

    /// Lay the bar out inside `bounds`. The touch target is vertically
    /// centered; the progress bar is inset horizontally by the edge inset.
    pub fn set_bounds(&mut self, bounds: Rect) {
        let touch_height = self.style.touch_target_height.min(bounds.height().max(0.0));
        let top = bounds.top() + (bounds.height() - touch_height) / 2.0;
        let seek_rect = Rect::from_min_max(
            pos2(bounds.left(), top),
            pos2(bounds.right(), top + touch_height),
        );

        let inset = self.style.edge_inset;
        let bar_top = top + (touch_height - self.style.bar_height) / 2.0;
        let progress_left = seek_rect.left() + inset;
        let progress_right = (seek_rect.right() - inset).max(progress_left);
        let progress_rect = Rect::from_min_max(
            pos2(progress_left, bar_top),
            pos2(progress_right, bar_top + self.style.bar_height),
        );

        if seek_rect != self.seek_rect || progress_rect != self.progress_rect {
            self.seek_rect = seek_rect;
            self.progress_rect = progress_rect;
            self.recompute_gaps();
        }
    }

    /// Full touch-target bounds.
    pub fn seek_rect(&self) -> Rect {
        self.seek_rect
    }

    /// Inset bar the progress fills are drawn on.
    pub fn progress_rect(&self) -> Rect {
        self.progress_rect
    }

    pub fn gap_segments(&self) -> &[GapSegment] {
        &self.gap_segments
    }

    fn recompute_gaps(&mut self) {
        self.gap_segments = match self.valid_duration() {
            Some(duration) => compute_gap_segments(
                &self.chapters,
                duration,
                self.seek_rect,
                self.progress_rect,
                self.style.chapter_gap,
            ),
            None => Vec::new(),
        };
    }

    /// Apply one host poll of the playback engine.
    pub fn tick(&mut self, position_ms: i64, buffered_position_ms: i64, duration_ms: Option<i64>) {
        self.set_duration(duration_ms);
        self.set_position(position_ms);
        self.set_buffered_position(buffered_position_ms);
    }

    /// Set the playback position and fire chapter/segment changes for it.
    ///
    /// Chapter changes are only evaluated while not scrubbing; the scrub
    /// gesture reports its own chapter with `drag == true`.
    pub fn set_position(&mut self, position_ms: i64) {
        if self.position_ms == position_ms {
            return;
        }
        self.position_ms = position_ms;

        if !self.scrub.is_scrubbing {
            self.update_chapter(position_ms, false);
        }
        if !self.segments.is_empty() {
            let resolved = segment_index_at(&self.segments, position_ms).map(|i| self.segments[i].clone());
            if resolved != self.current_segment {
                self.notify_segment_changed(resolved);
            }
        }
    }

    pub fn set_buffered_position(&mut self, buffered_position_ms: i64) {
        self.buffered_position_ms = buffered_position_ms;
    }

    /// Set the media duration; `None` means no media is loaded.
    ///
    /// Losing the duration mid-scrub cancels the gesture.
    pub fn set_duration(&mut self, duration_ms: Option<i64>) {
        if self.scrub.is_scrubbing && duration_ms.is_none() {
            self.stop_scrubbing(true);
        }
        if self.duration_ms != duration_ms {
            self.duration_ms = duration_ms;
            self.recompute_gaps();
        }
    }

    /// Playback position, `None` while no duration is set.
    pub fn position(&self) -> Option<i64> {
        self.duration_ms.map(|_| self.position_ms)
    }

    /// Buffered position, `None` while no duration is set.
    pub fn buffered_position(&self) -> Option<i64> {
        self.duration_ms.map(|_| self.buffered_position_ms)
    }

    pub fn duration(&self) -> Option<i64> {
        self.duration_ms
    }

    /// Duration usable for geometry: set and positive.
    pub fn valid_duration(&self) -> Option<i64> {
        self.duration_ms.filter(|d| *d > 0)
    }

    /// Playback position as text, for accessible descriptions.
    pub fn progress_text(&self) -> String {
        format_time(self.position_ms)
    }

    /// Interval at which the host should poll so the bar advances about one
    /// point per update. [`Duration::MAX`] when the bar has no width or no
    /// media is loaded.
    pub fn preferred_update_delay(&self) -> Duration {
        let width = self.progress_rect.width().max(0.0) as i64;
        match self.valid_duration() {
            Some(duration) if width > 0 => Duration::from_millis((duration / width) as u64),
            _ => Duration::MAX,
        }
    }

    /// Replace the chapters. Lists that are not a valid tiling (more than one
    /// entry, first starting at zero) are dropped entirely.
    pub fn set_chapters(&mut self, chapters: Vec<Chapter>) {
        self.chapters = normalize_chapters(chapters);
        if let Some(current) = &self.current_chapter {
            if !self.chapters.contains(current) {
                self.current_chapter = None;
            }
        }
        self.recompute_gaps();
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Replace the segments. Invalid intervals are filtered out.
    pub fn set_segments(&mut self, segments: Vec<Segment>) {
        self.segments = normalize_segments(segments);
        if let Some(current) = &self.current_segment {
            if !self.segments.contains(current) {
                self.current_segment = None;
            }
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.current_chapter.as_ref()
    }

    pub fn current_segment(&self) -> Option<&Segment> {
        self.current_segment.as_ref()
    }

    /// Chapter containing `position_ms`.
    pub fn chapter_at(&self, position_ms: i64) -> Option<&Chapter> {
        chapter_index_at(&self.chapters, position_ms).map(|i| &self.chapters[i])
    }

    /// First segment (in start order) containing `position_ms`.
    pub fn segment_at(&self, position_ms: i64) -> Option<&Segment> {
        segment_index_at(&self.segments, position_ms).map(|i| &self.segments[i])
    }

    fn update_chapter(&mut self, position_ms: i64, drag: bool) {
        let Some(index) = chapter_index_at(&self.chapters, position_ms) else {
            return;
        };
        if self.current_chapter.as_ref() != Some(&self.chapters[index]) {
            let chapter = self.chapters[index].clone();
            self.notify_chapter_changed(chapter, drag);
        }
    }

    fn notify_chapter_changed(&mut self, chapter: Chapter, drag: bool) {
        log::debug!("Chapter changed to {} (drag: {drag})", chapter.start_time_ms);
        for listener in self.segment_listeners.snapshot() {
            listener.on_chapter_changed(&chapter, drag);
        }
        self.with_preview(|preview| preview.set_title(chapter.display_title()));
        self.current_chapter = Some(chapter);
    }

    fn notify_segment_changed(&mut self, segment: Option<Segment>) {
        log::debug!("Segment changed to {:?}", segment.as_ref().map(|s| s.id));
        for listener in self.segment_listeners.snapshot() {
            listener.on_segment_changed(segment.as_ref());
        }
        self.current_segment = segment;
    }

    pub fn add_listener(&mut self, listener: Rc<dyn ScrubListener>) {
        self.scrub_listeners.add(listener);
    }

    pub fn remove_listener(&mut self, listener: &Rc<dyn ScrubListener>) -> bool {
        self.scrub_listeners.remove(listener)
    }

    pub fn add_segment_listener(&mut self, listener: Rc<dyn SegmentListener>) {
        self.segment_listeners.add(listener);
    }

    pub fn remove_segment_listener(&mut self, listener: &Rc<dyn SegmentListener>) -> bool {
        self.segment_listeners.remove(listener)
    }

    /// Attach or detach the preview panel driven during scrubs.
    pub fn set_preview(&mut self, preview: Option<Rc<RefCell<PreviewPanel>>>) {
        self.preview = preview;
    }

    pub fn preview(&self) -> Option<&Rc<RefCell<PreviewPanel>>> {
        self.preview.as_ref()
    }

    fn with_preview(&self, f: impl FnOnce(&mut PreviewPanel)) {
        let Some(preview) = &self.preview else {
            return;
        };
        match preview.try_borrow_mut() {
            Ok(mut panel) => f(&mut panel),
            Err(_) => log::warn!("Preview panel is borrowed elsewhere, skipping update"),
        }
    }

    pub fn show_scrubber(&mut self) {
        self.show_scrubber = true;
    }

    pub fn hide_scrubber(&mut self) {
        self.show_scrubber = false;
    }

    pub fn is_scrubber_shown(&self) -> bool {
        self.show_scrubber
    }

    /// Scrubber radius for the current state: largest while scrubbing or
    /// focused, smallest while disabled.
    pub fn scrubber_radius(&self) -> f32 {
        let diameter = if self.scrub.is_scrubbing || self.focused {
            self.style.scrubber_dragged_size
        } else if self.enabled {
            self.style.scrubber_enabled_size
        } else {
            self.style.scrubber_disabled_size
        };
        diameter / 2.0
    }

    /// Position shown by the played fill and the scrubber: the scrub position
    /// while scrubbing, the playback position otherwise.
    pub fn displayed_position(&self) -> i64 {
        if self.scrub.is_scrubbing {
            self.scrub.scrub_position_ms
        } else {
            self.position_ms
        }
    }

    /// Horizontal screen position of the displayed position. Scrubs map onto
    /// the full seek bounds, playback onto the progress bar.
    pub fn displayed_screen_x(&self) -> f32 {
        let Some(duration) = self.valid_duration() else {
            return self.progress_rect.left();
        };
        if self.scrub.is_scrubbing {
            screen_x(self.scrub.scrub_position_ms, duration, self.seek_rect)
        } else {
            screen_x(self.position_ms, duration, self.progress_rect)
        }
    }

    /// Scrubber center x, kept a radius away from the seek bounds' edges.
    pub fn scrubber_x(&self) -> f32 {
        let radius = self.scrubber_radius();
        let low = self.seek_rect.left() + radius;
        let high = (self.seek_rect.right() - radius).max(low);
        self.displayed_screen_x().clamp(low, high)
    }

    pub fn scrub_state(&self) -> ScrubState {
        self.scrub
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrub.is_scrubbing
    }

    /// Whether a gesture holds the pointer; the host should not hand drags
    /// to enclosing scroll areas meanwhile.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn clamp_to_duration(&self, position_ms: i64) -> i64 {
        position_ms.clamp(0, self.duration_ms.unwrap_or(0).max(0))
    }

    pub(crate) fn start_scrubbing(&mut self, scrub_position_ms: i64) {
        self.scrub = ScrubState {
            is_scrubbing: true,
            scrub_position_ms,
        };
        self.pressed = true;
        log::debug!("Scrub started at {scrub_position_ms}ms");

        self.on_library_scrub(scrub_position_ms, true);
        for listener in self.scrub_listeners.snapshot() {
            listener.on_scrub_start(scrub_position_ms);
        }
    }

    pub(crate) fn update_scrubbing(&mut self, scrub_position_ms: i64) {
        if !self.scrub.is_scrubbing || self.scrub.scrub_position_ms == scrub_position_ms {
            return;
        }
        self.scrub.scrub_position_ms = scrub_position_ms;

        self.on_library_scrub(scrub_position_ms, false);
        for listener in self.scrub_listeners.snapshot() {
            listener.on_scrub_move(scrub_position_ms);
        }
    }

    /// End the gesture. The host applies the seek in `on_scrub_stop`.
    pub(crate) fn stop_scrubbing(&mut self, canceled: bool) {
        self.auto_stop_deadline = None;
        if !self.scrub.is_scrubbing {
            return;
        }
        self.scrub.is_scrubbing = false;
        self.pressed = false;
        let position = self.scrub.scrub_position_ms;
        log::debug!("Scrub stopped at {position}ms (canceled: {canceled})");

        self.with_preview(|preview| preview.hide());
        for listener in self.scrub_listeners.snapshot() {
            listener.on_scrub_stop(position, canceled);
        }
    }

    /// Internal reactions that run ahead of the user's scrub listeners:
    /// chapter lookup with `drag == true` and preview updates.
    fn on_library_scrub(&mut self, scrub_position_ms: i64, started: bool) {
        let position = self.clamp_to_duration(scrub_position_ms);
        if !self.chapters.is_empty() {
            self.update_chapter(position, true);
        }

        let scrubber_x = self.scrubber_x();
        self.with_preview(|preview| {
            preview.update_position(scrubber_x, position);
            if started {
                preview.show();
            }
            preview.set_time(position);
        });
    }
}
