//! Data-driven game balance
//!
//! Every gameplay constant lives here so a page can override them without a
//! rebuild. Persisted in LocalStorage as JSON; missing fields take defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    pub gravity: f32,
    pub flap_impulse: f32,
    pub scroll_speed: f32,
    pub max_frame_dt: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub gap_min: f32,
    pub gap_max: f32,
    pub difficulty_slope: f32,
    pub spawn_interval: f32,
    pub spawn_margin: f32,
    pub spawn_offset: f32,
    pub despawn_margin: f32,

    // === Player ===
    pub player_x_ratio: f32,
    pub player_y_ratio: f32,
    pub player_radius: f32,
    pub rotation_scale: f32,
    pub rotation_min: f32,
    pub rotation_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            scroll_speed: SCROLL_SPEED,
            max_frame_dt: MAX_FRAME_DT,

            obstacle_width: OBSTACLE_WIDTH,
            gap_min: GAP_MIN,
            gap_max: GAP_MAX,
            difficulty_slope: DIFFICULTY_SLOPE,
            spawn_interval: SPAWN_INTERVAL,
            spawn_margin: SPAWN_MARGIN,
            spawn_offset: SPAWN_OFFSET,
            despawn_margin: DESPAWN_MARGIN,

            player_x_ratio: PLAYER_X_RATIO,
            player_y_ratio: PLAYER_Y_RATIO,
            player_radius: PLAYER_RADIUS,
            rotation_scale: ROTATION_SCALE,
            rotation_min: ROTATION_MIN,
            rotation_max: ROTATION_MAX,
        }
    }
}

impl Tuning {
    /// Parse a tuning record; unknown fields are ignored, missing ones default
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Repair values the simulation cannot work with
    ///
    /// Inverted ranges are swapped, magnitudes are made non-negative and the
    /// frame clamp, spawn interval and scroll speed are kept strictly positive.
    pub fn sanitized(mut self) -> Self {
        if self.gap_min > self.gap_max {
            std::mem::swap(&mut self.gap_min, &mut self.gap_max);
        }
        if self.rotation_min > self.rotation_max {
            std::mem::swap(&mut self.rotation_min, &mut self.rotation_max);
        }
        self.gap_min = self.gap_min.max(0.0);
        self.gap_max = self.gap_max.max(self.gap_min);
        self.difficulty_slope = self.difficulty_slope.max(0.0);
        self.obstacle_width = self.obstacle_width.max(0.0);
        self.player_radius = self.player_radius.max(0.0);
        self.spawn_margin = self.spawn_margin.max(0.0);
        self.spawn_offset = self.spawn_offset.max(0.0);
        self.despawn_margin = self.despawn_margin.max(0.0);
        self.gravity = self.gravity.max(0.0);
        self.flap_impulse = self.flap_impulse.max(0.0);
        self.player_x_ratio = self.player_x_ratio.clamp(0.0, 1.0);
        self.player_y_ratio = self.player_y_ratio.clamp(0.0, 1.0);
        // Obstacles must drift left or they are never recycled
        if self.scroll_speed.is_nan() || self.scroll_speed <= 0.0 {
            self.scroll_speed = SCROLL_SPEED;
        }
        if self.max_frame_dt.is_nan() || self.max_frame_dt <= 0.0 {
            self.max_frame_dt = MAX_FRAME_DT;
        }
        if self.spawn_interval.is_nan() || self.spawn_interval <= 0.0 {
            self.spawn_interval = SPAWN_INTERVAL;
        }
        if self.rotation_scale.is_nan() || self.rotation_scale.abs() <= f32::EPSILON {
            self.rotation_scale = ROTATION_SCALE;
        }
        self
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "flappy_roket_tuning";

    /// Load tuning from LocalStorage, falling back to defaults
    pub fn load() -> Self {
        match crate::platform::storage::get_item(Self::STORAGE_KEY) {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt tuning record: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}
