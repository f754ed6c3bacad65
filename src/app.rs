// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Demo host: a simulated player driving the time bar and its preview.
//!
//! The app plays the role a video screen has for the widget. It polls the
//! player at the bar's preferred cadence, seeks when a scrub ends, feeds the
//! preview with storyboard or placeholder thumbnails and hides the position
//! label while the preview covers it.

use crate::controls::{self, Adjustments};
use crate::io::markers::MarkerSet;
use crate::io::serialization::{self, StyleFile};
use crate::io::storyboard::Storyboard;
use crate::player::SimulatedPlayer;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};
use timebar::models::{chapter::Chapter, segment::Segment};
use timebar::preview::{thumbnail::ThumbnailTarget, PreviewListener, PreviewPanel};
use timebar::timebar::listeners::{ScrubListener, SegmentListener};
use timebar::timebar::{clamp_update_delay, TimeBar};
use timebar::ui::{preview_view::PreviewView, timebar_view::TimeBarView};
use timebar::util::time::{format_time, minutes_seconds};

const PULSE_DURATION: Duration = Duration::from_millis(250);

/// Chapters and segments of the bundled sample.
fn sample_markers() -> MarkerSet {
    let chapters = vec![
        Chapter::new(0, "Intro"),
        Chapter::new(minutes_seconds(0, 55), "First steps"),
        Chapter::new(
            minutes_seconds(2, 10),
            "A long chapter title to show the limited width of the preview and the thumbnail sliding along the text",
        ),
        Chapter::new(minutes_seconds(4, 0), "Some other chapter title"),
        Chapter::new(minutes_seconds(5, 0), "Somewhere in the middle"),
        Chapter::new(
            minutes_seconds(6, 10),
            "Another long chapter title to show the limited width of the preview",
        ),
        Chapter::new(minutes_seconds(8, 50), "Conclusion"),
        Chapter::new(minutes_seconds(9, 30), "Credits"),
    ];
    let segments = vec![
        Segment::new(0, "Yellow", minutes_seconds(1, 50), minutes_seconds(3, 10), egui::Color32::YELLOW),
        Segment::new(1, "Green", minutes_seconds(6, 50), minutes_seconds(7, 10), egui::Color32::GREEN),
        Segment::new(
            2,
            "Cyan",
            minutes_seconds(7, 40),
            minutes_seconds(9, 10),
            egui::Color32::from_rgb(0, 255, 255),
        ),
    ];
    let mut markers = MarkerSet::new(chapters, segments);
    markers.media_file = Some("sample".to_string());
    markers
}

/// Length of the bundled sample media.
fn sample_duration() -> i64 {
    minutes_seconds(10, 53)
}

/// Bar callbacks, recorded here and applied by the app after the bar
/// returns.
#[derive(Default)]
struct HostEvents {
    pending_seek: Cell<Option<i64>>,
    chapter_title: RefCell<String>,
    segment_label: RefCell<Option<String>>,
    pulse_on_chapter_drag: Cell<bool>,
    pulse: Cell<bool>,
}

impl ScrubListener for HostEvents {
    fn on_scrub_start(&self, position_ms: i64) {
        log::debug!("Demo scrub start at {position_ms}ms");
    }

    fn on_scrub_stop(&self, position_ms: i64, canceled: bool) {
        log::debug!("Demo scrub stop at {position_ms}ms (canceled: {canceled})");
        self.pending_seek.set(Some(position_ms));
    }
}

impl SegmentListener for HostEvents {
    fn on_segment_changed(&self, segment: Option<&Segment>) {
        *self.segment_label.borrow_mut() = segment.map(|s| s.label.clone());
    }

    fn on_chapter_changed(&self, chapter: &Chapter, drag: bool) {
        *self.chapter_title.borrow_mut() = chapter.display_title().to_owned();
        if drag && self.pulse_on_chapter_drag.get() {
            self.pulse.set(true);
        }
    }
}

/// Thumbnail provider and preview bounds observer.
struct ThumbnailSource {
    storyboard: RefCell<Option<Storyboard>>,
    preview_box: Cell<egui::Rect>,
}

impl ThumbnailSource {
    fn new() -> Self {
        Self {
            storyboard: RefCell::new(None),
            preview_box: Cell::new(egui::Rect::ZERO),
        }
    }
}

impl PreviewListener for ThumbnailSource {
    fn on_preview_position_update(&self, bounding_box: egui::Rect) {
        self.preview_box.set(bounding_box);
    }

    fn load_thumbnail(&self, target: &ThumbnailTarget, position_ms: i64) {
        let image = match self.storyboard.borrow().as_ref() {
            Some(board) => board.frame_at(position_ms),
            None => placeholder_frame(position_ms),
        };
        target.set_image(image);
    }
}

/// Flat frame whose hue walks with the position.
fn placeholder_frame(position_ms: i64) -> egui::ColorImage {
    let hue = (position_ms as f32 / 60_000.0).fract();
    let color: egui::Color32 = egui::ecolor::Hsva::new(hue, 0.55, 0.55, 1.0).into();
    egui::ColorImage::new([160, 90], color)
}

pub struct TimeBarDemoApp {
    player: SimulatedPlayer,
    bar: TimeBar,
    preview: Rc<RefCell<PreviewPanel>>,
    bar_view: TimeBarView,
    preview_view: PreviewView,
    events: Rc<HostEvents>,
    thumbnails: Rc<ThumbnailSource>,

    markers: MarkerSet,
    style: StyleFile,
    adjustments: Adjustments,
    applied: Option<Adjustments>,

    next_poll: Instant,
    pulse_until: Option<Instant>,
    position_label_rect: Option<egui::Rect>,

    /// Receiver for background storyboard decoding
    storyboard_loader: Option<Receiver<Result<Storyboard, String>>>,
    status: String,
}

impl Default for TimeBarDemoApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeBarDemoApp {
    pub fn new() -> Self {
        let mut player = SimulatedPlayer::new();
        player.load(sample_duration());
        player.play();

        let mut app = Self {
            player,
            bar: TimeBar::new(),
            preview: Rc::new(RefCell::new(PreviewPanel::new())),
            bar_view: TimeBarView::new(),
            preview_view: PreviewView::new(),
            events: Rc::new(HostEvents::default()),
            thumbnails: Rc::new(ThumbnailSource::new()),
            markers: sample_markers(),
            style: StyleFile::default(),
            adjustments: Adjustments::default(),
            applied: None,
            next_poll: Instant::now(),
            pulse_until: None,
            position_label_rect: None,
            storyboard_loader: None,
            status: "Ready".to_string(),
        };
        app.rebuild_widgets();
        app
    }

    /// Recreate bar and preview from the current style, then reapply markers
    /// and adjustments.
    fn rebuild_widgets(&mut self) {
        let mut bar = TimeBar::with_style(self.style.time_bar.clone());
        bar.add_listener(self.events.clone());
        bar.add_segment_listener(self.events.clone());

        let mut preview = PreviewPanel::with_style(self.style.preview.clone());
        preview.set_listener(Some(self.thumbnails.clone()));

        self.bar = bar;
        self.preview = Rc::new(RefCell::new(preview));
        self.applied = None;
        self.apply_adjustments();
        self.next_poll = Instant::now();
    }

    fn apply_markers(&mut self) {
        let chapters = if self.adjustments.show_chapters {
            self.markers.chapters.clone()
        } else {
            Vec::new()
        };
        let segments = if self.adjustments.show_segments {
            self.markers.segments.clone()
        } else {
            Vec::new()
        };
        self.bar.set_chapters(chapters);
        self.bar.set_segments(segments);
    }

    /// Push changed adjustments into the bar and preview.
    fn apply_adjustments(&mut self) {
        let current = self.adjustments.clone();
        let previous = self.applied.take();
        let changed =
            |f: fn(&Adjustments) -> bool| previous.as_ref().map_or(true, |p| f(p) != f(&current));

        if changed(|a| a.show_chapters) || changed(|a| a.show_segments) {
            self.apply_markers();
        }
        if changed(|a| a.controls_visible) {
            if current.controls_visible {
                self.bar.show_scrubber();
            } else {
                self.bar.hide_scrubber();
            }
        }
        if changed(|a| a.enabled) {
            self.bar.set_enabled(current.enabled);
        }
        self.events.pulse_on_chapter_drag.set(current.pulse_on_chapter_drag);

        if changed(|a| a.use_preview) {
            self.bar
                .set_preview(current.use_preview.then(|| self.preview.clone()));
        }

        {
            let mut preview = self.preview.borrow_mut();
            preview.use_title(current.use_title && current.show_chapters);
            preview.use_preview_only(current.preview_only);
            if let Err(e) = preview.set_frame_duration(current.frame_duration_ms) {
                log::error!("Rejected frame duration: {e}");
            }
            preview.adjust_with_display_cutout(current.cutout_left, current.cutout_right);
        }

        self.applied = Some(current);
    }

    /// Poll the player at the bar's preferred cadence.
    fn poll_player(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if now >= self.next_poll {
            self.player.advance(now);
            self.bar.tick(
                self.player.position(),
                self.player.buffered_position(),
                self.player.duration(),
            );
            self.next_poll = now + clamp_update_delay(self.bar.preferred_update_delay());
        }
        if self.player.is_playing() {
            ctx.request_repaint_after(self.next_poll.saturating_duration_since(now));
        }
    }

    /// Apply what the bar's listeners recorded during this frame.
    fn drain_events(&mut self) {
        if let Some(position) = self.events.pending_seek.take() {
            self.player.seek(position);
            self.bar.set_position(position);
            self.next_poll = Instant::now() + clamp_update_delay(self.bar.preferred_update_delay());
        }
        if self.events.pulse.take() {
            self.pulse_until = Some(Instant::now() + PULSE_DURATION);
        }
    }

    fn check_storyboard_loader(&mut self) {
        let Some(receiver) = &self.storyboard_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.storyboard_loader = None;
        match result {
            Ok(board) => {
                self.status = format!("Storyboard loaded ({} tiles)", board.tile_count());
                *self.thumbnails.storyboard.borrow_mut() = Some(board);
                self.preview.borrow().thumbnail().clear();
            }
            Err(e) => {
                log::error!("Failed to load storyboard: {e}");
                self.status = format!("Storyboard failed: {e}");
            }
        }
    }

    /// Decode a storyboard sheet on a background thread.
    fn open_storyboard(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.storyboard_loader = Some(receiver);
        self.status = "Loading storyboard...".to_string();

        let columns = self.adjustments.storyboard_columns;
        let rows = self.adjustments.storyboard_rows;
        let interval = self.adjustments.storyboard_interval_ms;
        std::thread::spawn(move || {
            let result = Storyboard::open(&path, columns, rows, interval).map_err(|e| e.to_string());
            let _ = sender.send(result);
        });
    }

    fn load_markers(&mut self, path: PathBuf) {
        match serialization::load_markers(&path) {
            Ok(markers) => {
                self.status = format!(
                    "Loaded {} chapter(s), {} segment(s)",
                    markers.chapters.len(),
                    markers.segments.len()
                );
                self.markers = markers;
                self.apply_markers();
            }
            Err(e) => {
                log::error!("Failed to load markers: {e:#}");
                self.status = format!("Markers failed: {e}");
            }
        }
    }

    fn save_markers(&mut self, path: PathBuf) {
        if let Err(e) = serialization::save_markers(&self.markers, &path) {
            log::error!("Failed to save markers: {e:#}");
            self.status = format!("Save failed: {e}");
        }
    }

    fn load_style(&mut self, path: PathBuf) {
        match serialization::load_style(&path) {
            Ok(style) => {
                self.style = style;
                self.rebuild_widgets();
                self.status = format!("Style loaded from {}", path.display());
            }
            Err(e) => {
                log::error!("Failed to load style: {e:#}");
                self.status = format!("Style failed: {e}");
            }
        }
    }

    fn save_style(&mut self, path: PathBuf) {
        if let Err(e) = serialization::save_style(&self.style, &path) {
            log::error!("Failed to save style: {e:#}");
            self.status = format!("Save failed: {e}");
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Load Markers...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Markers", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.load_markers(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Save Markers...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Markers", &["yaml", "yml", "json"])
                            .set_file_name("markers.yaml")
                            .save_file()
                        {
                            self.save_markers(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Load Style...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Style", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.load_style(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Save Style...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Style", &["yaml", "yml", "json"])
                            .set_file_name("style.yaml")
                            .save_file()
                        {
                            self.save_style(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Open Storyboard...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "webp"])
                            .pick_file()
                        {
                            self.open_storyboard(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Playback", |ui| {
                    if ui.button("Load Sample").clicked() {
                        self.player.load(sample_duration());
                        self.player.play();
                        self.next_poll = Instant::now();
                        ui.close_menu();
                    }
                    if ui.button("Unload").clicked() {
                        self.player.unload();
                        self.next_poll = Instant::now();
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn player_area(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        let video_height = (ui.available_height() - 80.0).max(120.0);
        let (video_rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), video_height),
            egui::Sense::hover(),
        );
        ui.painter().rect_filled(video_rect, 0.0, egui::Color32::from_gray(20));
        ui.painter().text(
            video_rect.center(),
            egui::Align2::CENTER_CENTER,
            self.events.chapter_title.borrow().as_str(),
            egui::FontId::proportional(20.0),
            egui::Color32::from_gray(160),
        );

        let bar_response = self.bar_view.show(ui, &mut self.bar);
        let pulsing = self.pulse_until.is_some_and(|until| Instant::now() < until);
        if pulsing {
            ui.painter().rect_stroke(
                bar_response.rect,
                2.0,
                egui::Stroke::new(1.0, egui::Color32::YELLOW),
            );
            ctx.request_repaint();
        }

        ui.horizontal(|ui| {
            let label = if self.player.is_playing() { "⏸" } else { "▶" };
            if ui.button(label).clicked() {
                if self.player.is_playing() {
                    self.player.pause();
                } else {
                    self.player.play();
                }
            }
            self.position_label(ui);
            if let Some(segment) = self.events.segment_label.borrow().as_deref() {
                ui.separator();
                ui.label(egui::RichText::new(segment).strong());
            }
        });

        let mut preview = self.preview.borrow_mut();
        self.preview_view
            .show(&ctx, &mut preview, video_rect, bar_response.rect.top() - 4.0);
    }

    /// Position label, hidden while the preview overlaps it.
    fn position_label(&mut self, ui: &mut egui::Ui) {
        let text = match self.player.duration() {
            Some(duration) => format!(
                "{} / {}",
                format_time(self.bar.position().unwrap_or(0)),
                format_time(duration)
            ),
            None => "--:--".to_string(),
        };

        let preview_box = self.thumbnails.preview_box.get();
        let covered = self
            .position_label_rect
            .is_some_and(|label| preview_box.width() > 0.0 && preview_box.intersects(label));
        let response = if covered {
            ui.label(egui::RichText::new(text).color(egui::Color32::TRANSPARENT))
        } else {
            ui.label(text)
        };
        self.position_label_rect = Some(response.rect);
    }
}

impl eframe::App for TimeBarDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_storyboard_loader();
        if self.storyboard_loader.is_some() {
            ctx.request_repaint();
        }
        self.poll_player(ctx);

        self.menu_bar(ctx);

        egui::SidePanel::right("adjustments")
            .default_width(260.0)
            .show(ctx, |ui| {
                controls::show(ui, &mut self.adjustments);
            });
        if self.applied.as_ref() != Some(&self.adjustments) {
            self.apply_adjustments();
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.separator();
                ui.label(format!(
                    "Update delay: {} ms",
                    clamp_update_delay(self.bar.preferred_update_delay()).as_millis()
                ));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.player_area(ui);
        });

        self.drain_events();
    }
}
