// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Opacity fade driven by the host's frame clock.
//!
//! A fade is pinned to the first instant it is sampled at, so starting one
//! needs no clock access.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    from: f32,
    to: f32,
    duration: Duration,
    started: Option<Instant>,
}

impl Fade {
    pub fn fade_in(duration: Duration) -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            duration,
            started: None,
        }
    }

    pub fn fade_out(duration: Duration) -> Self {
        Self {
            from: 1.0,
            to: 0.0,
            duration,
            started: None,
        }
    }

    /// Alpha the fade starts from, before it has been sampled.
    pub fn initial_alpha(&self) -> f32 {
        self.from
    }

    pub fn target_alpha(&self) -> f32 {
        self.to
    }

    /// Alpha at `now`, and whether the fade has completed.
    pub fn sample(&mut self, now: Instant) -> (f32, bool) {
        let started = *self.started.get_or_insert(now);
        if self.duration.is_zero() {
            return (self.to, true);
        }

        let elapsed = now.saturating_duration_since(started);
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        let alpha = self.from + (self.to - self.from) * ease(t);
        if t >= 1.0 {
            (self.to, true)
        } else {
            (alpha, false)
        }
    }
}

fn ease(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_in_progression() {
        let start = Instant::now();
        let mut fade = Fade::fade_in(Duration::from_millis(300));

        let (alpha, done) = fade.sample(start);
        assert_eq!(alpha, 0.0);
        assert!(!done);

        let (alpha, done) = fade.sample(start + Duration::from_millis(150));
        assert!((alpha - 0.5).abs() < 0.001);
        assert!(!done);

        let (alpha, done) = fade.sample(start + Duration::from_millis(300));
        assert_eq!(alpha, 1.0);
        assert!(done);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut fade = Fade::fade_out(Duration::ZERO);
        assert_eq!(fade.sample(Instant::now()), (0.0, true));
    }

    #[test]
    fn test_fade_pins_to_first_sample() {
        let start = Instant::now();
        let mut fade = Fade::fade_out(Duration::from_millis(100));
        let late = start + Duration::from_secs(5);
        let (alpha, done) = fade.sample(late);
        assert_eq!(alpha, 1.0);
        assert!(!done);
    }
}
