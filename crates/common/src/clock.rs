//! Clock and timing utilities for media synchronization.
//!
//! The playback controller and the media element each hold a notion of
//! "current position". This module provides utilities for:
//! - Measuring drift between the requested and the reported position
//! - Capping how often a per-frame redraw loop actually draws

/// Drift between the position the controller asked for and the position
/// the media element last reported, both in seconds.
#[derive(Debug, Clone, Copy)]
pub struct MediaDrift {
    /// Position requested by the controller.
    pub requested_secs: f64,
    /// Position reported by the media element.
    pub reported_secs: f64,
}

impl MediaDrift {
    pub fn new(requested_secs: f64, reported_secs: f64) -> Self {
        Self {
            requested_secs,
            reported_secs,
        }
    }

    /// Drift in seconds (positive = element is ahead).
    pub fn drift_secs(&self) -> f64 {
        self.reported_secs - self.requested_secs
    }

    /// Whether drift strictly exceeds the tolerance.
    ///
    /// Non-finite positions always count as drifted so the element gets
    /// re-synced to a sane value.
    pub fn exceeds(&self, tolerance_secs: f64) -> bool {
        let drift = self.drift_secs();
        !drift.is_finite() || drift.abs() > tolerance_secs
    }
}

/// Frame rate controller for the overlay redraw loop.
///
/// Timestamps are host animation-frame times in seconds.
#[derive(Debug, Clone)]
pub struct RateController {
    target_interval_secs: f64,
    last_tick_secs: Option<f64>,
}

impl RateController {
    /// Create a controller targeting the given Hz rate. `0` disables the cap.
    pub fn new(target_hz: u32) -> Self {
        let target_interval_secs = if target_hz == 0 {
            0.0
        } else {
            1.0 / target_hz as f64
        };
        Self {
            target_interval_secs,
            last_tick_secs: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, now_secs: f64) -> bool {
        match self.last_tick_secs {
            None => {
                self.last_tick_secs = Some(now_secs);
                true
            }
            Some(last) if now_secs >= last + self.target_interval_secs => {
                self.last_tick_secs = Some(now_secs);
                true
            }
            // Host clock went backwards (tab restored, new timeline origin).
            Some(last) if now_secs < last => {
                self.last_tick_secs = Some(now_secs);
                true
            }
            _ => false,
        }
    }

    /// Forget the last tick so the next call fires immediately.
    pub fn reset(&mut self) {
        self.last_tick_secs = None;
    }

    /// Target interval in seconds.
    pub fn interval_secs(&self) -> f64 {
        self.target_interval_secs
    }
}
