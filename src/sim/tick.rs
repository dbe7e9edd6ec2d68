//! Per-frame simulation tick and input actions
//!
//! `tick` advances a Playing session by one frame; `apply_action` handles the
//! discrete inputs between frames. Neither touches rendering or the platform.

use super::collision::{self, Collision};
use super::spawner;
use super::state::{Bounds, GameEvent, GamePhase, GameState};

/// Logical player inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fly up (also starts a run from the menu or after death)
    Flap,
    /// Pause/resume
    TogglePause,
    /// Mute/unmute sound cues
    ToggleMute,
    /// Start over immediately
    Restart,
}

/// Clamp a frame delta to `[0, max]` (NaN counts as 0)
#[inline]
pub fn clamp_dt(dt: f32, max: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.max(0.0).min(max)
}

/// Apply one discrete input immediately
pub fn apply_action(state: &mut GameState, action: Action, bounds: Bounds) {
    match action {
        Action::Flap => match state.phase {
            GamePhase::Dead => {
                // A flap on the game-over screen only starts the next run
                state.reset(bounds);
                start_run(state);
            }
            GamePhase::Menu => {
                start_run(state);
                flap(state);
            }
            GamePhase::Playing => flap(state),
            GamePhase::Paused => {}
        },
        Action::TogglePause => match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            _ => {}
        },
        Action::ToggleMute => {
            state.muted = !state.muted;
            log::info!("Muted: {}", state.muted);
        }
        Action::Restart => {
            state.reset(bounds);
            start_run(state);
        }
    }
}

fn start_run(state: &mut GameState) {
    state.phase = GamePhase::Playing;
    log::info!("Run started (high score {})", state.high_score);
}

fn flap(state: &mut GameState) {
    state.player.flap(state.tuning.flap_impulse);
    state.events.push(GameEvent::Flap);
}

/// Advance the session by one frame
///
/// Does nothing unless Playing. `dt` is clamped first, so a stalled frame
/// cannot move anything further than `max_frame_dt` allows.
pub fn tick(state: &mut GameState, bounds: Bounds, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let dt = clamp_dt(dt, state.tuning.max_frame_dt);
    state.since_start += dt;

    // Obstacles
    if state.spawner.advance(dt, state.tuning.spawn_interval) {
        let obstacle = spawner::spawn_obstacle(&mut state.rng, state.score, bounds, &state.tuning);
        log::debug!(
            "Spawned obstacle at x={:.0} gap_y={:.0} gap={:.0}",
            obstacle.x,
            obstacle.gap_y,
            obstacle.gap
        );
        state.obstacles.push_back(obstacle);
    }
    spawner::scroll(&mut state.obstacles, dt, state.tuning.scroll_speed);
    spawner::recycle(&mut state.obstacles, state.tuning.despawn_margin);

    // Player
    state.player.apply_gravity(dt, state.tuning.gravity);
    state.player.integrate(dt);

    // Scoring runs before collisions: a point earned on the fatal tick is kept
    award_passed(state);

    if let Some(hit) = collision::detect(&state.player, &state.obstacles, bounds) {
        die(state, hit);
    }
}

/// Score every obstacle the player has fully passed
fn award_passed(state: &mut GameState) {
    let player_x = state.player.pos.x;
    for obstacle in state.obstacles.iter_mut() {
        if obstacle.scored || player_x <= obstacle.trailing_edge() {
            continue;
        }
        obstacle.scored = true;
        state.score += 1;
        state.events.push(GameEvent::Score(state.score));

        if state.score > state.high_score {
            state.high_score = state.score;
            log::info!("New high score: {}", state.high_score);
            state.events.push(GameEvent::HighScore(state.high_score));
        }
    }
}

fn die(state: &mut GameState, hit: Collision) {
    state.phase = GamePhase::Dead;
    state.events.push(GameEvent::Death(state.score));
    log::info!(
        "Run over: {:?} after {:.1}s, score {} (high {})",
        hit,
        state.since_start,
        state.score,
        state.high_score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;
    use crate::tuning::Tuning;

    const BOUNDS: Bounds = Bounds::new(800.0, 600.0);
    /// Exactly representable, below the frame clamp
    const DT: f32 = 1.0 / 32.0;

    fn new_state() -> GameState {
        GameState::new(12345, Tuning::default(), BOUNDS)
    }

    fn playing_state() -> GameState {
        let mut state = new_state();
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_menu_to_playing_on_flap() {
        let mut state = new_state();
        tick(&mut state, BOUNDS, DT);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.player.vy, 0.0, "menu must not tick");

        apply_action(&mut state, Action::Flap, BOUNDS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.vy, -420.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Flap]);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = playing_state();
        apply_action(&mut state, Action::TogglePause, BOUNDS);
        assert_eq!(state.phase, GamePhase::Paused);

        let before = state.player.clone();
        tick(&mut state, BOUNDS, DT);
        assert_eq!(state.player, before, "paused must not tick");

        // Flap while paused does nothing
        apply_action(&mut state, Action::Flap, BOUNDS);
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(state.events.is_empty());

        apply_action(&mut state, Action::TogglePause, BOUNDS);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pause_ignored_in_menu_and_dead() {
        let mut state = new_state();
        apply_action(&mut state, Action::TogglePause, BOUNDS);
        assert_eq!(state.phase, GamePhase::Menu);

        state.phase = GamePhase::Dead;
        apply_action(&mut state, Action::TogglePause, BOUNDS);
        assert_eq!(state.phase, GamePhase::Dead);
    }

    #[test]
    fn test_flap_when_dead_resets_without_impulse() {
        let mut state = playing_state();
        state.score = 4;
        state.high_score = 4;
        state.player.vy = 300.0;
        state.obstacles.push_back(Obstacle {
            x: 50.0,
            gap_y: 300.0,
            gap: 200.0,
            width: 70.0,
            scored: true,
        });
        state.phase = GamePhase::Dead;

        apply_action(&mut state, Action::Flap, BOUNDS);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 4);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.vy, 0.0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_restart_from_any_phase() {
        for phase in [
            GamePhase::Menu,
            GamePhase::Playing,
            GamePhase::Paused,
            GamePhase::Dead,
        ] {
            let mut state = new_state();
            state.phase = phase;
            state.score = 2;
            apply_action(&mut state, Action::Restart, BOUNDS);
            assert_eq!(state.phase, GamePhase::Playing, "{phase:?}");
            assert_eq!(state.score, 0);
        }
    }

    #[test]
    fn test_mute_is_orthogonal() {
        let mut state = playing_state();
        apply_action(&mut state, Action::ToggleMute, BOUNDS);
        assert!(state.muted);
        assert_eq!(state.phase, GamePhase::Playing);
        apply_action(&mut state, Action::Restart, BOUNDS);
        assert!(state.muted, "mute survives restarts");
        apply_action(&mut state, Action::ToggleMute, BOUNDS);
        assert!(!state.muted);
    }

    #[test]
    fn test_clamp_dt() {
        assert_eq!(clamp_dt(0.016, 0.033), 0.016);
        assert_eq!(clamp_dt(5.0, 0.033), 0.033);
        assert_eq!(clamp_dt(-1.0, 0.033), 0.0);
        assert_eq!(clamp_dt(f32::NAN, 0.033), 0.0);
        assert_eq!(clamp_dt(f32::INFINITY, 0.033), 0.033);
    }

    #[test]
    fn test_stalled_frame_is_clamped() {
        let mut state = playing_state();
        let y0 = state.player.pos.y;
        tick(&mut state, BOUNDS, 2.0);
        assert!((state.since_start - 0.033).abs() < 1e-6);
        // vy = 1500 * 0.033, y += vy * 0.033
        let expected = y0 + 1500.0 * 0.033 * 0.033;
        assert!((state.player.pos.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut state = playing_state();
        tick(&mut state, BOUNDS, DT);
        tick(&mut state, BOUNDS, DT);
        assert!((state.player.vy - 1500.0 * 2.0 * DT).abs() < 1e-3);
        assert!(state.player.pos.x == BOUNDS.width * 0.28, "x never moves");
    }

    #[test]
    fn test_scores_once_per_obstacle() {
        let mut state = playing_state();
        state.player.pos.x = 200.0;
        state.obstacles.push_back(Obstacle {
            x: 100.0,
            gap_y: 300.0,
            gap: 160.0,
            width: 70.0,
            scored: false,
        });

        tick(&mut state, BOUNDS, DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 1);
        assert!(state.obstacles[0].scored);
        assert_eq!(state.high_score, 1);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Score(1), GameEvent::HighScore(1)]
        );

        tick(&mut state, BOUNDS, DT);
        assert_eq!(state.score, 1);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_no_high_score_event_below_record() {
        let mut state = playing_state();
        state.high_score = 10;
        state.player.pos.x = 200.0;
        state.obstacles.push_back(Obstacle {
            x: 100.0,
            gap_y: 300.0,
            gap: 160.0,
            width: 70.0,
            scored: false,
        });
        tick(&mut state, BOUNDS, DT);
        assert_eq!(state.score, 1);
        assert_eq!(state.high_score, 10);
        assert_eq!(state.drain_events(), vec![GameEvent::Score(1)]);
    }

    #[test]
    fn test_score_kept_on_fatal_tick() {
        let mut state = playing_state();
        state.player.pos.x = 200.0;
        // Already passed...
        state.obstacles.push_back(Obstacle {
            x: 100.0,
            gap_y: 300.0,
            gap: 160.0,
            width: 70.0,
            scored: false,
        });
        // ...and at the same time slamming into the ground
        state.player.pos.y = BOUNDS.height - 10.0;

        tick(&mut state, BOUNDS, DT);

        assert_eq!(state.phase, GamePhase::Dead);
        assert_eq!(state.score, 1);
        assert_eq!(state.high_score, 1);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Score(1),
                GameEvent::HighScore(1),
                GameEvent::Death(1)
            ]
        );
    }

    #[test]
    fn test_obstacle_collision_kills() {
        let mut state = playing_state();
        // Pipe right on top of the player with the gap far above
        state.obstacles.push_back(Obstacle {
            x: state.player.pos.x - 35.0,
            gap_y: 100.0,
            gap: 160.0,
            width: 70.0,
            scored: false,
        });
        tick(&mut state, BOUNDS, DT);
        assert_eq!(state.phase, GamePhase::Dead);

        // Dead sessions stay frozen
        let frozen = state.player.clone();
        tick(&mut state, BOUNDS, DT);
        assert_eq!(state.player, frozen);
    }

    #[test]
    fn test_spawns_on_interval() {
        let mut state = playing_state();
        // Keep the player hovering so the run lasts
        let interval = state.tuning.spawn_interval;
        let ticks_per_spawn = (interval / DT).round() as usize;
        assert_eq!(ticks_per_spawn, 40);

        let mut spawn_times = Vec::new();
        for _ in 0..(ticks_per_spawn * 3) {
            let before = state.obstacles.len();
            state.player.vy = 0.0;
            state.player.pos.y = 300.0;
            tick(&mut state, BOUNDS, DT);
            if state.obstacles.len() > before {
                spawn_times.push(state.since_start);
            }
        }

        assert_eq!(spawn_times.len(), 3);
        for (i, t) in spawn_times.iter().enumerate() {
            let expected = interval * (i + 1) as f32;
            assert!((t - expected).abs() < 1e-3, "spawn {i} at {t}, expected {expected}");
        }
        for o in &state.obstacles {
            let (lo, hi) = spawner::gap_center_range(o.gap, state.tuning.spawn_margin, BOUNDS.height);
            assert!(o.gap_y >= lo && o.gap_y <= hi);
        }
    }

    #[test]
    fn test_spawn_uses_current_width() {
        let mut state = playing_state();
        state.spawner.since_spawn = state.tuning.spawn_interval;
        let wide = Bounds::new(1200.0, 600.0);
        tick(&mut state, wide, DT);
        // Spawned at 1210, then scrolled once
        let expected = 1210.0 - state.tuning.scroll_speed * DT;
        assert!((state.obstacles[0].x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_shrunk_height_kills_on_next_tick() {
        let mut state = playing_state();
        tick(&mut state, BOUNDS, DT);
        assert_eq!(state.phase, GamePhase::Playing);

        // Window resized: the rocket now pokes through the new floor
        let short = Bounds::new(BOUNDS.width, state.player.pos.y + 5.0);
        tick(&mut state, short, DT);
        assert_eq!(state.phase, GamePhase::Dead);
        assert_eq!(state.drain_events(), vec![GameEvent::Death(0)]);
    }
}
