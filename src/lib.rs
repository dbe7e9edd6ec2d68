//! Flappy Roket - a one-button rocket arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawning, collisions, phases)
//! - `game`: Frame driver wiring the simulation to audio and persistence
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance
//! - `audio`: Sound cues and the Web Audio backend
//! - `highscores`: High score persistence
//! - `settings`: Player preferences (volume, mute, auto-pause)

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::{HighScoreStore, MemoryHighScore};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Downward acceleration (px/s²)
    pub const GRAVITY: f32 = 1500.0;
    /// Upward velocity set by a flap (px/s)
    pub const FLAP_IMPULSE: f32 = 420.0;
    /// Obstacle scroll speed (px/s)
    pub const SCROLL_SPEED: f32 = 180.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 70.0;
    pub const GAP_MIN: f32 = 160.0;
    pub const GAP_MAX: f32 = 220.0;
    /// Gap shrink per point scored (px)
    pub const DIFFICULTY_SLOPE: f32 = 1.5;
    /// Seconds between spawns
    pub const SPAWN_INTERVAL: f32 = 1.25;
    /// Minimum distance between a gap and the top/bottom edge
    pub const SPAWN_MARGIN: f32 = 40.0;
    /// Obstacles appear this far past the right edge
    pub const SPAWN_OFFSET: f32 = 10.0;
    /// Obstacles are dropped once their right edge is this far past the left edge
    pub const DESPAWN_MARGIN: f32 = 10.0;

    /// Player defaults
    pub const PLAYER_X_RATIO: f32 = 0.28;
    pub const PLAYER_Y_RATIO: f32 = 0.45;
    pub const PLAYER_RADIUS: f32 = 18.0;

    /// Visual tilt: vy / ROTATION_SCALE, clamped (radians)
    pub const ROTATION_SCALE: f32 = 600.0;
    pub const ROTATION_MIN: f32 = -0.35;
    pub const ROTATION_MAX: f32 = 0.9;

    /// Largest frame delta fed to the simulation (prevents tunneling after stalls)
    pub const MAX_FRAME_DT: f32 = 0.033;
}

/// Clamp without panicking on an inverted range (`lo` wins)
#[inline]
pub fn clamp_lenient(v: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(v))
}
