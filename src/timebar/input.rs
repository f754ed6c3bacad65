// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer, key, focus and enable handling.
//!
//! Key scrubs have no release event, so they commit on their own after a
//! timeout. The host drives that timeout by calling [`TimeBar::poll`] with its
//! frame clock.

use super::{KeyIncrement, TimeBar};
use crate::error::{Result, TimeBarError};
use crate::util::geometry::time_at_inset_screen_x;
use egui::Pos2;
use std::time::{Duration, Instant};

/// Pointer events in the bar's screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up(Pos2),
    Cancel,
}

/// Keys the bar reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBarKey {
    Left,
    Right,
    /// Enter or d-pad center: ends a key scrub as canceled.
    Confirm,
}

impl TimeBar {
    /// Feed a pointer event. Returns whether the bar consumed it.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let Some(duration) = self.valid_duration() else {
            return false;
        };
        if !self.enabled {
            return false;
        }

        match event {
            PointerEvent::Down(pos) => {
                if !self.seek_rect.contains(pos) {
                    return false;
                }
                let time = self.time_at_pointer(pos.x, duration);
                if self.scrub.is_scrubbing {
                    // A press during a key scrub takes the gesture over.
                    self.auto_stop_deadline = None;
                    self.pressed = true;
                    self.update_scrubbing(time);
                } else {
                    self.start_scrubbing(time);
                }
                true
            }
            PointerEvent::Move(pos) if self.scrub.is_scrubbing => {
                let time = self.time_at_pointer(pos.x, duration);
                self.update_scrubbing(time);
                true
            }
            PointerEvent::Up(_) if self.scrub.is_scrubbing => {
                self.stop_scrubbing(false);
                true
            }
            PointerEvent::Cancel if self.scrub.is_scrubbing => {
                self.stop_scrubbing(true);
                true
            }
            _ => false,
        }
    }

    fn time_at_pointer(&self, x: f32, duration: i64) -> i64 {
        time_at_inset_screen_x(x, duration, self.progress_rect, self.style.drag_offset)
    }

    /// Feed a key press at `now`. Returns whether the bar consumed it.
    pub fn handle_key(&mut self, key: TimeBarKey, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }
        match key {
            TimeBarKey::Left | TimeBarKey::Right => {
                let increment = self.position_increment();
                let change = if key == TimeBarKey::Left {
                    -increment
                } else {
                    increment
                };
                if !self.scrub_incrementally(change) {
                    return false;
                }
                let timeout = Duration::from_millis(self.style.key_stop_timeout_ms);
                self.auto_stop_deadline = now.checked_add(timeout);
                if self.auto_stop_deadline.is_none() {
                    log::warn!("Key stop timeout of {timeout:?} overflows, scrub stays open");
                }
                true
            }
            TimeBarKey::Confirm => {
                if !self.scrub.is_scrubbing {
                    return false;
                }
                self.stop_scrubbing(true);
                true
            }
        }
    }

    /// Commit a key scrub whose timeout has passed. Returns whether a scrub
    /// was stopped.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.auto_stop_deadline {
            Some(deadline) if now >= deadline => {
                self.auto_stop_deadline = None;
                let was_scrubbing = self.scrub.is_scrubbing;
                self.stop_scrubbing(false);
                was_scrubbing
            }
            _ => false,
        }
    }

    /// Time left until a pending key scrub commits.
    pub fn auto_stop_remaining(&self, now: Instant) -> Option<Duration> {
        self.auto_stop_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Move one increment forward or backward and commit immediately, as an
    /// accessibility scroll action does. Returns whether the position moved.
    pub fn step(&mut self, forward: bool) -> bool {
        let increment = self.position_increment();
        let change = if forward { increment } else { -increment };
        if !self.scrub_incrementally(change) {
            return false;
        }
        self.stop_scrubbing(false);
        true
    }

    /// Enable or disable input. Disabling mid-scrub cancels the gesture.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled && self.scrub.is_scrubbing {
            self.stop_scrubbing(true);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Track keyboard focus. Losing it mid-scrub commits the gesture
    /// (not canceled, unlike disabling).
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused && self.scrub.is_scrubbing {
            self.stop_scrubbing(false);
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Step keys by `duration / count`. Clears any fixed time step.
    pub fn set_key_count_increment(&mut self, count: u32) -> Result<()> {
        if count == 0 {
            return Err(TimeBarError::InvalidKeyCountIncrement(count));
        }
        self.key_increment = KeyIncrement::Count(count);
        Ok(())
    }

    /// Step keys by a fixed time. Clears any count increment.
    pub fn set_key_time_increment(&mut self, time_ms: i64) -> Result<()> {
        if time_ms <= 0 {
            return Err(TimeBarError::InvalidKeyTimeIncrement(time_ms));
        }
        self.key_increment = KeyIncrement::Time(time_ms);
        Ok(())
    }

    pub fn key_increment(&self) -> KeyIncrement {
        self.key_increment
    }

    /// Current key step in milliseconds; 0 for count increments while no
    /// duration is set.
    pub fn position_increment(&self) -> i64 {
        match self.key_increment {
            KeyIncrement::Time(time_ms) => time_ms,
            KeyIncrement::Count(count) => self
                .duration_ms
                .map_or(0, |duration| duration / i64::from(count)),
        }
    }

    /// Start or continue a scrub `change_ms` away from the current scrub (or
    /// playback) position. Returns false when the clamped position would not
    /// move.
    pub fn scrub_incrementally(&mut self, change_ms: i64) -> bool {
        let Some(duration) = self.valid_duration() else {
            return false;
        };
        let previous = self.displayed_position();
        let target = previous.saturating_add(change_ms).clamp(0, duration);
        if target == previous {
            return false;
        }

        if self.scrub.is_scrubbing {
            self.update_scrubbing(target);
        } else {
            self.start_scrubbing(target);
        }
        true
    }
}
