// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback time formatting.

/// Format milliseconds as `m:ss`, or `h:mm:ss` once an hour is reached.
///
/// Negative values keep their sign in front of the formatted magnitude.
pub fn format_time(millis: i64) -> String {
    let sign = if millis < 0 { "-" } else { "" };
    let total_secs = (millis.unsigned_abs() + 500) / 1000;
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{sign}{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{sign}{mins}:{secs:02}")
    }
}

/// Build a millisecond timestamp from minutes and seconds.
pub fn minutes_seconds(minutes: i64, seconds: i64) -> i64 {
    (minutes * 60 + seconds) * 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(65_000), "1:05");
        assert_eq!(format_time(3_661_000), "1:01:01");
    }

    #[test]
    fn test_format_time_rounds_to_nearest_second() {
        assert_eq!(format_time(59_499), "0:59");
        assert_eq!(format_time(59_500), "1:00");
    }

    #[test]
    fn test_format_negative_time() {
        assert_eq!(format_time(-5_000), "-0:05");
    }

    #[test]
    fn test_minutes_seconds() {
        assert_eq!(minutes_seconds(2, 10), 130_000);
        assert_eq!(minutes_seconds(0, 55), 55_000);
    }
}
