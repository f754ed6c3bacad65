// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! egui widget for the time bar.
//!
//! Allocates the bar's touch target, forwards pointer, key and focus input
//! into the [`TimeBar`] and paints its render plan.

use crate::timebar::input::{PointerEvent, TimeBarKey};
use crate::timebar::render::RenderPlan;
use crate::timebar::TimeBar;
use std::time::Instant;

/// Per-widget input state that outlives a frame.
#[derive(Debug, Default)]
pub struct TimeBarView {
    /// A pointer gesture started on the bar and has not been released.
    pointer_active: bool,
}

impl TimeBarView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out, drive and paint `bar` across the available width.
    pub fn show(&mut self, ui: &mut egui::Ui, bar: &mut TimeBar) -> egui::Response {
        let size = egui::vec2(ui.available_width(), bar.style().touch_target_height);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
        bar.set_bounds(rect);

        if bar.is_enabled() != ui.is_enabled() {
            bar.set_enabled(ui.is_enabled());
        }

        self.handle_pointer(ui, &response, bar);
        self.handle_focus_and_keys(ui, &response, bar);

        let now = Instant::now();
        bar.poll(now);
        if let Some(remaining) = bar.auto_stop_remaining(now) {
            ui.ctx().request_repaint_after(remaining);
        }

        paint(ui.painter(), &bar.render_plan());
        response
    }

    fn handle_pointer(&mut self, ui: &egui::Ui, response: &egui::Response, bar: &mut TimeBar) {
        if response.is_pointer_button_down_on() {
            let Some(pos) = response.interact_pointer_pos() else {
                return;
            };
            if self.pointer_active {
                bar.handle_pointer(PointerEvent::Move(pos));
            } else if bar.handle_pointer(PointerEvent::Down(pos)) {
                self.pointer_active = true;
                response.request_focus();
            }
            return;
        }

        if self.pointer_active {
            self.pointer_active = false;
            let released = ui.input(|i| i.pointer.latest_pos());
            let event = match released {
                Some(pos) => PointerEvent::Up(pos),
                None => PointerEvent::Cancel,
            };
            bar.handle_pointer(event);
        }
    }

    fn handle_focus_and_keys(&mut self, ui: &egui::Ui, response: &egui::Response, bar: &mut TimeBar) {
        if response.gained_focus() {
            bar.set_focused(true);
        }
        if response.lost_focus() {
            bar.set_focused(false);
        }
        if !response.has_focus() {
            return;
        }

        ui.memory_mut(|memory| {
            memory.set_focus_lock_filter(
                response.id,
                egui::EventFilter {
                    horizontal_arrows: true,
                    ..Default::default()
                },
            );
        });

        let now = Instant::now();
        let keys = [
            (egui::Key::ArrowLeft, TimeBarKey::Left),
            (egui::Key::ArrowRight, TimeBarKey::Right),
            (egui::Key::Enter, TimeBarKey::Confirm),
        ];
        for (key, bar_key) in keys {
            if ui.input(|i| i.key_pressed(key)) {
                bar.handle_key(bar_key, now);
            }
        }
    }
}

/// Paint a render plan back to front.
pub fn paint(painter: &egui::Painter, plan: &RenderPlan) {
    for region in &plan.regions {
        painter.rect_filled(region.rect, 0.0, region.color);
    }
    if let Some(scrubber) = plan.scrubber {
        painter.circle_filled(scrubber.center, scrubber.radius, scrubber.color);
    }
}
