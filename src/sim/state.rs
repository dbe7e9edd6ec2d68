//! Game state and core simulation types
//!
//! Everything that changes while a session runs lives in [`GameState`].

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing moves until the first flap
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended, next flap starts over
    Dead,
}

/// Drawable world size, supplied by the host every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The player's rocket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Center position (x is fixed for the whole run)
    pub pos: Vec2,
    /// Vertical velocity (positive = downward)
    pub vy: f32,
    /// Collision radius
    pub radius: f32,
}

impl Player {
    /// Spawn at the canonical start position for the given world size
    pub fn spawn(bounds: Bounds, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                bounds.width * tuning.player_x_ratio,
                bounds.height * tuning.player_y_ratio,
            ),
            vy: 0.0,
            radius: tuning.player_radius,
        }
    }

    pub fn apply_gravity(&mut self, dt: f32, gravity: f32) {
        self.vy += gravity * dt;
    }

    /// Replace vertical velocity with an upward impulse
    pub fn flap(&mut self, impulse: f32) {
        self.vy = -impulse;
    }

    pub fn integrate(&mut self, dt: f32) {
        self.pos.y += self.vy * dt;
    }

    /// Visual tilt in radians (nose down when falling)
    pub fn rotation(&self, tuning: &Tuning) -> f32 {
        crate::clamp_lenient(
            self.vy / tuning.rotation_scale,
            tuning.rotation_min,
            tuning.rotation_max,
        )
    }

    /// Engine flame length factor: long when climbing, short when falling
    pub fn thrust(&self) -> f32 {
        (1.0 - (self.vy + 400.0) / 1200.0).clamp(0.1, 1.2)
    }
}

/// A pipe pair: solid above and below a vertical gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Vertical center of the gap
    pub gap_y: f32,
    /// Gap height
    pub gap: f32,
    pub width: f32,
    /// Player has already passed this one
    pub scored: bool,
}

impl Obstacle {
    /// Right edge
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_y - self.gap / 2.0
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_y + self.gap / 2.0
    }
}

/// Discrete things that happened during an action or tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player flapped
    Flap,
    /// An obstacle was cleared; carries the new score
    Score(u32),
    /// The high score was beaten; carries the new high score
    HighScore(u32),
    /// Run ended; carries the final score
    Death(u32),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Gap placement randomness
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    /// Live obstacles, leftmost first
    pub obstacles: VecDeque<Obstacle>,
    pub score: u32,
    /// Best score seen (survives resets)
    pub high_score: u32,
    /// Seconds of play since the run started
    pub since_start: f32,
    pub spawner: Spawner,
    /// Orthogonal to phase
    pub muted: bool,
    /// Pending events for the driver
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session in the menu
    pub fn new(seed: u64, tuning: Tuning, bounds: Bounds) -> Self {
        let player = Player::spawn(bounds, &tuning);
        Self {
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Menu,
            player,
            obstacles: VecDeque::new(),
            score: 0,
            high_score: 0,
            since_start: 0.0,
            spawner: Spawner::default(),
            muted: false,
            events: Vec::new(),
        }
    }

    /// Start a fresh run (back to the menu)
    ///
    /// High score, mute flag, tuning and RNG stream are kept.
    pub fn reset(&mut self, bounds: Bounds) {
        self.player = Player::spawn(bounds, &self.tuning);
        self.obstacles.clear();
        self.score = 0;
        self.since_start = 0.0;
        self.spawner = Spawner::default();
        self.phase = GamePhase::Menu;
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for presentation
    pub fn snapshot(&self, bounds: Bounds) -> Snapshot {
        Snapshot {
            phase: self.phase,
            bounds,
            player: PlayerView {
                x: self.player.pos.x,
                y: self.player.pos.y,
                radius: self.player.radius,
                rotation: self.player.rotation(&self.tuning),
                thrust: self.player.thrust(),
            },
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    gap_y: o.gap_y,
                    gap: o.gap,
                    width: o.width,
                })
                .collect(),
            score: self.score,
            high_score: self.high_score,
            muted: self.muted,
        }
    }
}

/// Player as seen by presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub rotation: f32,
    pub thrust: f32,
}

/// Obstacle as seen by presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f32,
    pub gap_y: f32,
    pub gap: f32,
    pub width: f32,
}

/// Everything presentation needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub bounds: Bounds,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub high_score: u32,
    pub muted: bool,
}
