// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Storyboard sprite sheets.
//!
//! A storyboard is one image holding a grid of equally sized thumbnails,
//! row-major, one tile per `interval_ms` of media.

use timebar::TimeBarError;
use anyhow::Result;
use egui::ColorImage;
use image::{imageops, RgbaImage};
use std::path::Path;

pub struct Storyboard {
    sheet: RgbaImage,
    columns: u32,
    rows: u32,
    interval_ms: i64,
}

impl Storyboard {
    /// Wrap an already decoded sheet.
    pub fn new(sheet: RgbaImage, columns: u32, rows: u32, interval_ms: i64) -> timebar::Result<Self> {
        if columns == 0 || rows == 0 || sheet.width() < columns || sheet.height() < rows {
            return Err(TimeBarError::InvalidStoryboardGrid { columns, rows });
        }
        if interval_ms <= 0 {
            return Err(TimeBarError::InvalidFrameDuration(interval_ms));
        }
        Ok(Self {
            sheet,
            columns,
            rows,
            interval_ms,
        })
    }

    /// Decode a sheet from disk.
    pub fn open(path: &Path, columns: u32, rows: u32, interval_ms: i64) -> Result<Self> {
        let sheet = image::open(path)?.into_rgba8();
        log::info!(
            "Loaded storyboard {} ({}x{} px, {columns}x{rows} tiles)",
            path.display(),
            sheet.width(),
            sheet.height()
        );
        Ok(Self::new(sheet, columns, rows, interval_ms)?)
    }

    pub fn tile_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Size of one tile in pixels.
    pub fn tile_size(&self) -> [u32; 2] {
        [self.sheet.width() / self.columns, self.sheet.height() / self.rows]
    }

    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }

    /// Tile shown for `position_ms`. Positions past the last tile stay on it.
    pub fn tile_index_at(&self, position_ms: i64) -> u32 {
        let index = (position_ms.max(0) / self.interval_ms).min(i64::from(self.tile_count() - 1));
        index as u32
    }

    /// Crop the tile for `position_ms` out of the sheet.
    pub fn frame_at(&self, position_ms: i64) -> ColorImage {
        let index = self.tile_index_at(position_ms);
        let [width, height] = self.tile_size();
        let x = (index % self.columns) * width;
        let y = (index / self.columns) * height;

        let tile = imageops::crop_imm(&self.sheet, x, y, width, height).to_image();
        ColorImage::from_rgba_unmultiplied([width as usize, height as usize], tile.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// 2x2 grid of 4x3 tiles, each filled with its index as the red channel.
    fn sheet() -> RgbaImage {
        RgbaImage::from_fn(8, 6, |x, y| {
            let index = (y / 3) * 2 + x / 4;
            Rgba([index as u8, 0, 0, 255])
        })
    }

    #[test]
    fn test_tile_lookup() {
        let board = Storyboard::new(sheet(), 2, 2, 10_000).unwrap();
        assert_eq!(board.tile_size(), [4, 3]);
        assert_eq!(board.tile_index_at(0), 0);
        assert_eq!(board.tile_index_at(9_999), 0);
        assert_eq!(board.tile_index_at(25_000), 2);
        assert_eq!(board.tile_index_at(500_000), 3);
        assert_eq!(board.tile_index_at(-1), 0);
    }

    #[test]
    fn test_frame_crops_the_tile() {
        let board = Storyboard::new(sheet(), 2, 2, 10_000).unwrap();
        let frame = board.frame_at(35_000);
        assert_eq!(frame.size, [4, 3]);
        assert!(frame.pixels.iter().all(|p| p.r() == 3));

        let frame = board.frame_at(12_000);
        assert!(frame.pixels.iter().all(|p| p.r() == 1));
    }

    #[test]
    fn test_invalid_grid() {
        assert_eq!(
            Storyboard::new(sheet(), 0, 2, 10_000).err(),
            Some(TimeBarError::InvalidStoryboardGrid { columns: 0, rows: 2 })
        );
        assert!(Storyboard::new(sheet(), 2, 2, 0).is_err());
    }
}
