// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Adjustment panel of the demo.
//!
//! Every toggle maps onto one time bar or preview setting; the app compares
//! the previous and current values and applies only what changed.

/// Demo settings editable in the side panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustments {
    pub show_chapters: bool,
    pub show_segments: bool,
    pub use_preview: bool,
    pub use_title: bool,
    pub preview_only: bool,
    pub pulse_on_chapter_drag: bool,
    pub controls_visible: bool,
    pub enabled: bool,
    pub frame_duration_ms: i64,
    pub cutout_left: f32,
    pub cutout_right: f32,
    pub storyboard_columns: u32,
    pub storyboard_rows: u32,
    pub storyboard_interval_ms: i64,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            show_chapters: true,
            show_segments: true,
            use_preview: true,
            use_title: true,
            preview_only: false,
            pulse_on_chapter_drag: true,
            controls_visible: true,
            enabled: true,
            frame_duration_ms: 20_000,
            cutout_left: 0.0,
            cutout_right: 0.0,
            storyboard_columns: 10,
            storyboard_rows: 10,
            storyboard_interval_ms: 10_000,
        }
    }
}

/// Display the adjustment panel. Edits `adjustments` in place.
pub fn show(ui: &mut egui::Ui, adjustments: &mut Adjustments) {
    ui.heading("Time bar");
    ui.checkbox(&mut adjustments.show_chapters, "Show chapters");
    ui.checkbox(&mut adjustments.show_segments, "Show segments");
    ui.checkbox(&mut adjustments.controls_visible, "Controls visible (scrubber)");
    ui.checkbox(&mut adjustments.enabled, "Enabled");
    ui.checkbox(
        &mut adjustments.pulse_on_chapter_drag,
        "Pulse on chapter change while dragging",
    );

    ui.separator();
    ui.heading("Preview");
    ui.checkbox(&mut adjustments.use_preview, "Attach preview");
    ui.add_enabled_ui(adjustments.use_preview, |ui| {
        if ui.checkbox(&mut adjustments.use_title, "Show chapter title").changed()
            && adjustments.use_title
        {
            adjustments.preview_only = false;
        }
        ui.checkbox(&mut adjustments.preview_only, "Thumbnail only");

        ui.horizontal(|ui| {
            ui.label("Frame duration");
            ui.add(
                egui::DragValue::new(&mut adjustments.frame_duration_ms)
                    .range(1_000..=120_000)
                    .suffix(" ms"),
            );
        });
        ui.horizontal(|ui| {
            ui.label("Cutout insets");
            ui.add(egui::DragValue::new(&mut adjustments.cutout_left).range(0.0..=80.0));
            ui.add(egui::DragValue::new(&mut adjustments.cutout_right).range(0.0..=80.0));
        });
    });

    ui.separator();
    ui.heading("Storyboard");
    ui.horizontal(|ui| {
        ui.label("Grid");
        ui.add(egui::DragValue::new(&mut adjustments.storyboard_columns).range(1..=50));
        ui.label("x");
        ui.add(egui::DragValue::new(&mut adjustments.storyboard_rows).range(1..=50));
    });
    ui.horizontal(|ui| {
        ui.label("Interval");
        ui.add(
            egui::DragValue::new(&mut adjustments.storyboard_interval_ms)
                .range(1_000..=120_000)
                .suffix(" ms"),
        );
    });
    ui.label(
        egui::RichText::new("Applies to the next sheet opened from the File menu")
            .italics()
            .weak(),
    );
}
