// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Demo file I/O: marker sets, styles and storyboard sprite sheets.
//!
//! The time bar library reads none of these itself; the demo loads them and
//! pushes the results in through the public setters.

pub mod markers;
pub mod serialization;
pub mod storyboard;
