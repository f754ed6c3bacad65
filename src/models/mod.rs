// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: chapters, segments and styles.

pub mod chapter;
pub mod segment;
pub mod style;
