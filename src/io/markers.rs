// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Chapter and segment sets for marker files.
//!
//! A marker file bundles the chapters and highlight segments of one media
//! item, so they can be loaded into a time bar together.

use timebar::models::{chapter::Chapter, segment::Segment};
use serde::{Deserialize, Serialize};

/// Complete marker data for serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerSet {
    #[serde(default)]
    pub media_file: Option<String>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl MarkerSet {
    /// Create a marker set from chapters and segments.
    pub fn new(chapters: Vec<Chapter>, segments: Vec<Segment>) -> Self {
        Self {
            media_file: None,
            chapters,
            segments,
        }
    }
}
