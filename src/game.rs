//! Frame driver
//!
//! Owns the session, the frame clock and the optional collaborators (sound,
//! high score store). The host calls [`Game::frame`] once per rendered frame
//! and [`Game::handle`] whenever an input arrives; both forward the events the
//! simulation raised to the collaborators.

use crate::audio::{SoundEffect, SoundPlayer};
use crate::highscores::HighScoreStore;
use crate::platform::FrameClock;
use crate::sim::{self, Action, Bounds, GameEvent, GamePhase, GameState, Snapshot};
use crate::tuning::Tuning;

/// A running game session plus its collaborators
pub struct Game {
    state: GameState,
    clock: FrameClock,
    store: Option<Box<dyn HighScoreStore>>,
    audio: Option<Box<dyn SoundPlayer>>,
}

impl Game {
    /// Start a session in the menu; the high score is read once, here
    pub fn new(
        seed: u64,
        tuning: Tuning,
        bounds: Bounds,
        store: Option<Box<dyn HighScoreStore>>,
        audio: Option<Box<dyn SoundPlayer>>,
    ) -> Self {
        let tuning = tuning.sanitized();
        let clock = FrameClock::new(tuning.max_frame_dt);
        let mut state = GameState::new(seed, tuning, bounds);
        state.high_score = store.as_ref().map(|s| s.load()).unwrap_or(0);
        log::info!("Game initialized with seed: {}", seed);

        Self {
            state,
            clock,
            store,
            audio,
        }
    }

    /// Session without persistence or sound
    pub fn headless(seed: u64, tuning: Tuning, bounds: Bounds) -> Self {
        Self::new(seed, tuning, bounds, None, None)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self, bounds: Bounds) -> Snapshot {
        self.state.snapshot(bounds)
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.state.muted = muted;
    }

    /// Advance one rendered frame given its timestamp (ms); returns the dt used
    pub fn frame(&mut self, now_ms: f64, bounds: Bounds) -> f32 {
        let dt = self.clock.advance(now_ms);
        self.step(dt, bounds);
        dt
    }

    /// Advance by an explicit delta (clamped by the simulation)
    pub fn step(&mut self, dt: f32, bounds: Bounds) {
        sim::tick(&mut self.state, bounds, dt);
        self.dispatch_events();
    }

    /// Apply an input immediately
    pub fn handle(&mut self, action: Action, bounds: Bounds) {
        let was_playing = self.state.phase == GamePhase::Playing;
        sim::apply_action(&mut self.state, action, bounds);
        // Time spent paused or on a menu never reaches the simulation
        if !was_playing && self.state.phase == GamePhase::Playing {
            self.clock.reset();
        }
        self.dispatch_events();
    }

    /// Route pending simulation events to sound and persistence
    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Flap => self.cue(SoundEffect::Flap),
                GameEvent::Score(_) => self.cue(SoundEffect::Score),
                GameEvent::HighScore(high) => {
                    if let Some(store) = self.store.as_mut() {
                        store.save(high);
                    }
                }
                GameEvent::Death(_) => self.cue(SoundEffect::Death),
            }
        }
    }

    fn cue(&mut self, effect: SoundEffect) {
        if self.state.muted {
            return;
        }
        if let Some(audio) = self.audio.as_mut() {
            audio.play(effect);
        }
    }
}
