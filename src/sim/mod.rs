//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time enters only through `tick`'s (clamped) delta
//! - Seeded RNG only
//! - Obstacles kept in spawn order (leftmost first)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Collision, Rect, circle_rect_intersect};
pub use spawner::{Spawner, gap_height};
pub use state::{
    Bounds, GameEvent, GamePhase, GameState, Obstacle, ObstacleView, Player, PlayerView, Snapshot,
};
pub use tick::{Action, apply_action, clamp_dt, tick};
