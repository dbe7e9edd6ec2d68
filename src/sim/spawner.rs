//! Obstacle spawning, scrolling and recycling
//!
//! Obstacles enter at the right edge on a fixed interval and leave from the
//! left edge. Spawn order equals left-to-right order, so expired obstacles are
//! always at the front of the queue.

use std::collections::VecDeque;

use rand::Rng;

use super::state::{Bounds, Obstacle};
use crate::tuning::Tuning;

/// Spawn timer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spawner {
    /// Seconds since the last spawn (or since the run started)
    pub since_spawn: f32,
}

impl Spawner {
    /// Accumulate time; true when an obstacle is due
    ///
    /// The timer restarts from zero on a spawn and the remainder is dropped,
    /// so one tick produces at most one obstacle.
    pub fn advance(&mut self, dt: f32, interval: f32) -> bool {
        self.since_spawn += dt;
        if self.since_spawn >= interval {
            self.since_spawn = 0.0;
            true
        } else {
            false
        }
    }
}

/// Gap height for the current score: shrinks linearly, never below the minimum
pub fn gap_height(score: u32, tuning: &Tuning) -> f32 {
    (tuning.gap_max - score as f32 * tuning.difficulty_slope)
        .min(tuning.gap_max)
        .max(tuning.gap_min)
}

/// Allowed range for the gap center, keeping the whole gap `margin` away from
/// the top and bottom. A world too short for the gap collapses the range to
/// its midpoint.
pub fn gap_center_range(gap: f32, margin: f32, world_height: f32) -> (f32, f32) {
    let lo = margin + gap / 2.0;
    let hi = world_height - margin - gap / 2.0;
    if hi < lo {
        let mid = (lo + hi) / 2.0;
        (mid, mid)
    } else {
        (lo, hi)
    }
}

/// Build a new obstacle just past the right edge
pub fn spawn_obstacle<R: Rng>(rng: &mut R, score: u32, bounds: Bounds, tuning: &Tuning) -> Obstacle {
    let gap = gap_height(score, tuning);
    let (lo, hi) = gap_center_range(gap, tuning.spawn_margin, bounds.height);
    let gap_y = if hi > lo { rng.random_range(lo..=hi) } else { lo };

    Obstacle {
        x: bounds.width + tuning.spawn_offset,
        gap_y,
        gap,
        width: tuning.obstacle_width,
        scored: false,
    }
}

/// Move every obstacle left
pub fn scroll(obstacles: &mut VecDeque<Obstacle>, dt: f32, speed: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= speed * dt;
    }
}

/// Drop obstacles whose right edge has passed `-margin`; returns how many
pub fn recycle(obstacles: &mut VecDeque<Obstacle>, margin: f32) -> usize {
    let mut removed = 0;
    while obstacles
        .front()
        .is_some_and(|o| o.trailing_edge() < -margin)
    {
        obstacles.pop_front();
        removed += 1;
    }
    removed
}
