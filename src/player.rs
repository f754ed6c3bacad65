// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Stand-in playback engine for the demo.
//!
//! Advances a position in real time and keeps a buffer window ahead of it.
//! The bar polls it like a real player and seeks it when a scrub ends.

use std::time::Instant;

/// How far the simulated buffer runs ahead of playback.
const BUFFER_AHEAD_MS: i64 = 45_000;

pub struct SimulatedPlayer {
    duration_ms: Option<i64>,
    position_ms: i64,
    playing: bool,
    last_advance: Option<Instant>,
}

impl SimulatedPlayer {
    pub fn new() -> Self {
        Self {
            duration_ms: None,
            position_ms: 0,
            playing: false,
            last_advance: None,
        }
    }

    /// Load media of the given length and rewind.
    pub fn load(&mut self, duration_ms: i64) {
        log::info!("Loaded media, duration {duration_ms}ms");
        self.duration_ms = Some(duration_ms);
        self.position_ms = 0;
        self.last_advance = None;
    }

    pub fn unload(&mut self) {
        log::info!("Unloaded media");
        self.duration_ms = None;
        self.position_ms = 0;
        self.playing = false;
    }

    pub fn play(&mut self) {
        self.playing = self.duration_ms.is_some();
        self.last_advance = None;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn seek(&mut self, position_ms: i64) {
        let end = self.duration_ms.unwrap_or(0);
        self.position_ms = position_ms.clamp(0, end);
        log::debug!("Seek to {}ms", self.position_ms);
    }

    /// Move playback forward by the wall time since the last call.
    pub fn advance(&mut self, now: Instant) {
        let last = self.last_advance.replace(now);
        let (Some(duration), Some(last)) = (self.duration_ms, last) else {
            return;
        };
        if !self.playing {
            return;
        }
        let elapsed = now.saturating_duration_since(last).as_millis() as i64;
        self.position_ms = (self.position_ms + elapsed).min(duration);
        if self.position_ms == duration {
            self.playing = false;
        }
    }

    pub fn position(&self) -> i64 {
        self.position_ms
    }

    pub fn buffered_position(&self) -> i64 {
        let end = self.duration_ms.unwrap_or(0);
        (self.position_ms + BUFFER_AHEAD_MS).min(end)
    }

    pub fn duration(&self) -> Option<i64> {
        self.duration_ms
    }
}
