//! Playback time, time ranges, and display formatting.
//!
//! Time is a non-negative number of seconds. Every externally supplied time
//! (seek, drag, programmatic set) goes through [`clamp_time`] before it is
//! stored, so `NaN`, negatives and infinities never reach the stores.

use serde::{Deserialize, Serialize};

/// Playback position or span in seconds.
pub type Seconds = f64;

/// Tolerance for float noise when converting to whole centiseconds.
const CENTI_EPSILON: f64 = 1e-6;

/// Normalize a duration: non-finite or negative values become `0.0`.
pub fn sanitize_duration(duration: Seconds) -> Seconds {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}

/// Clamp `t` into `[0, duration]`.
///
/// `NaN` and `-inf` map to `0`, `+inf` maps to `duration`. Idempotent.
pub fn clamp_time(t: Seconds, duration: Seconds) -> Seconds {
    let duration = sanitize_duration(duration);
    if t.is_nan() {
        return 0.0;
    }
    t.clamp(0.0, duration)
}

/// Guard for display formatting: anything that is not a finite,
/// non-negative number renders as zero.
fn display_secs(t: Seconds) -> Seconds {
    if t.is_finite() && t > 0.0 {
        t
    } else {
        0.0
    }
}

fn whole_centis(t: Seconds) -> u64 {
    (display_secs(t) * 100.0 + CENTI_EPSILON).floor() as u64
}

/// Format as `MM:SS` (transport read-out).
pub fn format_clock(t: Seconds) -> String {
    let centis = whole_centis(t);
    let mins = centis / 6000;
    let secs = (centis / 100) % 60;
    format!("{mins:02}:{secs:02}")
}

/// Format as `MM:SS.cc` (timeline ruler and playhead read-out).
pub fn format_precise(t: Seconds) -> String {
    let centis = whole_centis(t);
    let mins = centis / 6000;
    let secs = (centis / 100) % 60;
    let cc = centis % 100;
    format!("{mins:02}:{secs:02}.{cc:02}")
}

/// Format as `M:SS` (stock footage duration labels).
pub fn format_duration_label(t: Seconds) -> String {
    let whole = display_secs(t).floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// An inclusive time range `[start, end]` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: Seconds,
    pub end: Seconds,
}

impl TimeRange {
    /// Build a range from two bounds, ordering them if needed.
    pub fn new(a: Seconds, b: Seconds) -> Self {
        let a = display_secs(a);
        let b = display_secs(b);
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// `[start, start + span]`.
    pub fn starting_at(start: Seconds, span: Seconds) -> Self {
        let start = display_secs(start);
        Self::new(start, start + display_secs(span))
    }

    /// `[start, min(start + span, duration)]`, with `start` clamped to the
    /// duration first.
    pub fn starting_at_within(start: Seconds, span: Seconds, duration: Seconds) -> Self {
        let start = clamp_time(start, duration);
        let end = (start + display_secs(span)).min(sanitize_duration(duration));
        Self::new(start, end)
    }

    /// Whether `t` is active in this range (both ends inclusive).
    pub fn contains(&self, t: Seconds) -> bool {
        t >= self.start && t <= self.end
    }

    /// Length of the range in seconds.
    pub fn length(&self) -> Seconds {
        self.end - self.start
    }

    /// Whether the range has zero length.
    pub fn is_empty(&self) -> bool {
        self.length() <= 0.0
    }

    /// Restore `start <= end` after field-wise edits by collapsing the end
    /// onto the start.
    pub fn normalized(self) -> Self {
        let start = display_secs(self.start);
        let end = display_secs(self.end).max(start);
        Self { start, end }
    }
}

/// Free-function form of [`TimeRange::contains`].
pub fn is_active(range: &TimeRange, t: Seconds) -> bool {
    range.contains(t)
}
