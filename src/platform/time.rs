//! Frame timing
//!
//! Turns the host's per-frame timestamps (milliseconds, as handed to
//! `requestAnimationFrame` callbacks) into clamped simulation deltas.

use crate::sim::clamp_dt;

/// Converts frame timestamps into simulation deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous frame, clamped to `[0, max_dt]`
    ///
    /// The first frame yields 0. Timestamps going backwards yield 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        clamp_dt(dt, self.max_dt)
    }

    /// Forget the previous timestamp (next frame yields 0)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
