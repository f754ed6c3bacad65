// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! egui painter for the preview panel.
//!
//! Draws on a tooltip-order layer so the panel floats above the video and
//! controls. The thumbnail texture is re-uploaded only when the target's
//! generation changes.

use crate::preview::{PreviewPanel, TextMeasure};
use egui::{Color32, FontId, Rect};
use std::time::Instant;

const TITLE_FONT_SIZE: f32 = 13.0;
const TIME_FONT_SIZE: f32 = 14.0;
const BACKGROUND: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 200);

#[derive(Default)]
pub struct PreviewView {
    texture: Option<egui::TextureHandle>,
    uploaded_generation: Option<u64>,
}

impl PreviewView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the fade, lay the panel out inside `parent` with its bottom at
    /// `bottom`, and paint it. Returns the panel rect when something was drawn.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        panel: &mut PreviewPanel,
        parent: Rect,
        bottom: f32,
    ) -> Option<Rect> {
        if panel.advance(Instant::now()) {
            ctx.request_repaint();
        }
        if !panel.is_visible() {
            return None;
        }
        self.sync_texture(ctx, panel);

        let alpha = panel.alpha();
        let text_color = Color32::WHITE.gamma_multiply(alpha);
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Tooltip,
            egui::Id::new("timebar_preview"),
        ));

        let title = painter.layout_no_wrap(
            panel.title().to_owned(),
            FontId::proportional(TITLE_FONT_SIZE),
            text_color,
        );
        let time = painter.layout_no_wrap(
            panel.time_text().to_owned(),
            FontId::monospace(TIME_FONT_SIZE),
            text_color,
        );
        let measure = TextMeasure {
            title_width: if panel.title().is_empty() { 0.0 } else { title.size().x },
            time_width: time.size().x,
        };
        let layout = panel.layout(parent, bottom, measure);

        painter.rect_filled(layout.panel_rect, 4.0, BACKGROUND.gamma_multiply(alpha));
        match &self.texture {
            Some(texture) => painter.image(
                texture.id(),
                layout.thumbnail_rect,
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE.gamma_multiply(alpha),
            ),
            None => painter.rect_filled(
                layout.thumbnail_rect,
                0.0,
                Color32::from_gray(60).gamma_multiply(alpha),
            ),
        };
        painter.rect_stroke(
            layout.thumbnail_rect,
            0.0,
            egui::Stroke::new(1.0, Color32::WHITE.gamma_multiply(alpha)),
        );

        if let Some(rect) = layout.title_rect {
            let pos = egui::pos2(rect.left(), rect.center().y - title.size().y / 2.0);
            painter.with_clip_rect(rect).galley(pos, title, text_color);
        }
        if let Some(rect) = layout.time_rect {
            let pos = egui::pos2(rect.left(), rect.center().y - time.size().y / 2.0);
            painter.galley(pos, time, text_color);
        }

        Some(layout.panel_rect)
    }

    fn sync_texture(&mut self, ctx: &egui::Context, panel: &PreviewPanel) {
        let target = panel.thumbnail();
        let generation = target.generation();
        if self.uploaded_generation == Some(generation) {
            return;
        }
        self.uploaded_generation = Some(generation);
        self.texture = target.image().map(|image| {
            ctx.load_texture(
                "timebar_preview_thumbnail",
                (*image).clone(),
                egui::TextureOptions::LINEAR,
            )
        });
    }
}
