// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! egui adapters for the time bar and its preview panel.

pub mod preview_view;
pub mod timebar_view;
