// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Time bar demo
//!
//! A desktop host for the chaptered seek bar: a simulated player, sample
//! chapters and segments, and a panel of adjustments.

mod app;
mod controls;
mod io;
mod player;

use anyhow::Result;
use app::TimeBarDemoApp;

fn main() -> Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 640.0])
            .with_min_inner_size([640.0, 420.0])
            .with_title("Time Bar Demo"),
        ..Default::default()
    };

    log::info!("Starting time bar demo");
    eframe::run_native(
        "timebar-demo",
        options,
        Box::new(|_cc| Ok(Box::new(TimeBarDemoApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
