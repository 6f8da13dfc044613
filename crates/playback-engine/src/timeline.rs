//! Timeline mapping: pointer positions to playback time and back.
//!
//! Scrubbing is continuous: every pointer move while the button is held
//! produces a seek. There is no throttling here; hosts with very
//! high-frequency pointer events get one seek per event.

use serde::{Deserialize, Serialize};

use clipdeck_project_model::overlay::TextOverlayStore;
use clipdeck_project_model::scene::SceneStore;
use clipdeck_project_model::time::{clamp_time, format_precise, sanitize_duration, Seconds, TimeRange};

/// Seconds of media per ruler interval before the interval count is capped.
const RULER_SECS_PER_INTERVAL: f64 = 10.0;

/// Maximum number of ruler intervals.
const RULER_MAX_INTERVALS: usize = 20;

/// Time at horizontal offset `px` within a track `track_width_px` wide.
pub fn position_to_time(px: f64, track_width_px: f64, duration: Seconds) -> Seconds {
    if !(track_width_px.is_finite() && track_width_px > 0.0) {
        return 0.0;
    }
    clamp_time((px / track_width_px) * duration, duration)
}

/// Offset of `t` along the track as a percentage in `[0, 100]`.
pub fn time_to_percentage(t: Seconds, duration: Seconds) -> f64 {
    let duration = sanitize_duration(duration);
    if duration > 0.0 {
        (clamp_time(t, duration) / duration) * 100.0
    } else {
        0.0
    }
}

/// A labelled tick on the time ruler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulerMarker {
    pub time: Seconds,
    /// `MM:SS.cc`.
    pub label: String,
}

/// Evenly spaced ruler ticks from `0` to `duration` inclusive.
///
/// Uses `min(ceil(duration / 10), 20)` intervals, so `intervals + 1`
/// markers. Empty when the duration is zero.
pub fn ruler_markers(duration: Seconds) -> Vec<RulerMarker> {
    let duration = sanitize_duration(duration);
    if duration <= 0.0 {
        return Vec::new();
    }
    let intervals = ((duration / RULER_SECS_PER_INTERVAL).ceil() as usize).min(RULER_MAX_INTERVALS);
    (0..=intervals)
        .map(|i| {
            let time = duration * i as f64 / intervals as f64;
            RulerMarker {
                time,
                label: format_precise(time),
            }
        })
        .collect()
}

/// Horizontal placement of a range on a track, in percent of track width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackBlock {
    pub id: String,
    pub label: String,
    pub left_pct: f64,
    pub width_pct: f64,
    pub color: Option<String>,
}

/// `(left, width)` percentages for `range` on a track of `duration`.
pub fn range_span_pct(range: &TimeRange, duration: Seconds) -> (f64, f64) {
    let left = time_to_percentage(range.start, duration);
    let right = time_to_percentage(range.end, duration);
    (left, (right - left).max(0.0))
}

/// Blocks for the scene track.
pub fn scene_blocks(scenes: &SceneStore, duration: Seconds) -> Vec<TrackBlock> {
    scenes
        .iter()
        .map(|scene| {
            let (left_pct, width_pct) = range_span_pct(&scene.range, duration);
            TrackBlock {
                id: scene.id.clone(),
                label: scene.name.clone(),
                left_pct,
                width_pct,
                color: Some(scene.color.clone()),
            }
        })
        .collect()
}

/// Blocks for the text overlay track.
pub fn text_overlay_blocks(overlays: &TextOverlayStore, duration: Seconds) -> Vec<TrackBlock> {
    overlays
        .iter()
        .map(|overlay| {
            let (left_pct, width_pct) = range_span_pct(&overlay.range, duration);
            TrackBlock {
                id: overlay.id.clone(),
                label: overlay.text.clone(),
                left_pct,
                width_pct,
                color: None,
            }
        })
        .collect()
}

/// Press/move/release drag session over the timeline track.
#[derive(Debug, Clone, Default)]
pub struct ScrubGesture {
    dragging: bool,
}

impl ScrubGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Begin a drag. Returns the time to seek to, or `None` while no
    /// duration is known.
    pub fn press(&mut self, px: f64, track_width_px: f64, duration: Seconds) -> Option<Seconds> {
        self.dragging = true;
        Self::target(px, track_width_px, duration)
    }

    /// Pointer moved. Only yields a seek while a drag is in progress.
    pub fn drag(&mut self, px: f64, track_width_px: f64, duration: Seconds) -> Option<Seconds> {
        if !self.dragging {
            return None;
        }
        Self::target(px, track_width_px, duration)
    }

    /// End the drag.
    pub fn release(&mut self) {
        self.dragging = false;
    }

    fn target(px: f64, track_width_px: f64, duration: Seconds) -> Option<Seconds> {
        if sanitize_duration(duration) <= 0.0 {
            return None;
        }
        let t = position_to_time(px, track_width_px, duration);
        tracing::debug!(px, time = t, "Timeline scrub");
        Some(t)
    }
}
