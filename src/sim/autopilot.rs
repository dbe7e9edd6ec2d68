//! Demo-mode pilot
//!
//! Aims for the center of the next gap and flaps whenever the rocket has
//! sunk below it. Used for the attract/demo mode and the headless runner.

use super::state::{Bounds, GamePhase, GameState};

/// How far below the target the rocket may drift before flapping (px)
const AIM_SLACK: f32 = 18.0;

/// Height the pilot is currently steering toward
pub fn target_y(state: &GameState, bounds: Bounds) -> f32 {
    let player = &state.player;
    state
        .obstacles
        .iter()
        .find(|o| o.trailing_edge() + player.radius >= player.pos.x)
        .map(|o| o.gap_y)
        .unwrap_or(bounds.height / 2.0)
}

/// Whether a flap right now keeps the rocket on course
pub fn wants_flap(state: &GameState, bounds: Bounds) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let player = &state.player;
    let falling = player.vy >= 0.0;
    falling && player.pos.y > target_y(state, bounds) + AIM_SLACK
}
