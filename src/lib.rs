// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Chaptered seek bar with a floating scrub preview.
//!
//! [`TimeBar`] maps media time onto the bar, runs the scrub gesture and
//! reports chapter and segment transitions. [`PreviewPanel`] places the
//! thumbnail, title and time label above the scrubber while a scrub is in
//! progress. The `ui` module paints both with egui.

pub mod error;
pub mod models;
pub mod preview;
pub mod timebar;
pub mod ui;
pub mod util;

pub use error::{Result, TimeBarError};
pub use preview::PreviewPanel;
pub use timebar::TimeBar;
