// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Marker and style file serialization.
//!
//! Files are YAML or JSON, picked by extension. Anything that is not `.json`
//! is read and written as YAML.

use super::markers::MarkerSet;
use timebar::models::style::{PreviewStyle, TimeBarStyle};
use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;

/// Both styles in one file. Either section may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleFile {
    pub time_bar: TimeBarStyle,
    pub preview: PreviewStyle,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn write_file<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let text = if is_json(path) {
        serde_json::to_string_pretty(data)?
    } else {
        serde_yaml::to_string(data)?
    };
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

fn read_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let data = if is_json(path) {
        serde_json::from_str(&text)?
    } else {
        serde_yaml::from_str(&text)?
    };
    log::info!("Loaded {}", path.display());
    Ok(data)
}

/// Save markers, choosing the format from the extension.
pub fn save_markers(markers: &MarkerSet, path: &Path) -> Result<()> {
    write_file(markers, path)
}

/// Load markers, choosing the format from the extension.
pub fn load_markers(path: &Path) -> Result<MarkerSet> {
    read_file(path)
}

pub fn save_style(style: &StyleFile, path: &Path) -> Result<()> {
    write_file(style, path)
}

pub fn load_style(path: &Path) -> Result<StyleFile> {
    read_file(path)
}
