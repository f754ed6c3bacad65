// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Slot the host fills with thumbnail pixels.
//!
//! The preview hands a clone of its target to the host on every load
//! request; the host may fill it at any later point on the UI thread.

use egui::ColorImage;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Slot {
    requested_ms: Option<i64>,
    image: Option<Rc<ColorImage>>,
    generation: u64,
}

/// Shared handle to the preview's thumbnail image.
#[derive(Clone, Default)]
pub struct ThumbnailTarget {
    slot: Rc<RefCell<Slot>>,
}

impl ThumbnailTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store new pixels. Bumps the generation so painters can re-upload.
    pub fn set_image(&self, image: ColorImage) {
        let mut slot = self.slot.borrow_mut();
        slot.image = Some(Rc::new(image));
        slot.generation += 1;
    }

    pub fn clear(&self) {
        let mut slot = self.slot.borrow_mut();
        slot.image = None;
        slot.generation += 1;
    }

    pub fn image(&self) -> Option<Rc<ColorImage>> {
        self.slot.borrow().image.clone()
    }

    /// Counter that changes whenever the image changes.
    pub fn generation(&self) -> u64 {
        self.slot.borrow().generation
    }

    /// Position of the most recent load request.
    pub fn requested_position(&self) -> Option<i64> {
        self.slot.borrow().requested_ms
    }

    pub(crate) fn mark_requested(&self, position_ms: i64) {
        self.slot.borrow_mut().requested_ms = Some(position_ms);
    }
}

impl std::fmt::Debug for ThumbnailTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("ThumbnailTarget")
            .field("requested_ms", &slot.requested_ms)
            .field("has_image", &slot.image.is_some())
            .field("generation", &slot.generation)
            .finish()
    }
}
