//! Flappy Roket entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use flappy_roket::audio::AudioManager;
    use flappy_roket::highscores::LocalStorageHighScore;
    use flappy_roket::platform::{action_for_key, prevents_default};
    use flappy_roket::sim::{Action, Bounds, GamePhase, autopilot};
    use flappy_roket::{Game, Settings, Tuning};

    // Hand each frame's snapshot to the page's renderer, if it installed one
    #[wasm_bindgen(inline_js = "
        export function present_frame(json) {
            if (typeof window.presentFrame === 'function') {
                window.presentFrame(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn present_frame(json: &str);
    }

    /// Browser-side wrapper around the game
    struct WebGame {
        game: Game,
        canvas: HtmlCanvasElement,
        settings: Settings,
        /// Attract mode: the autopilot flies
        demo: bool,
    }

    impl WebGame {
        /// Current drawable size in CSS pixels
        fn bounds(&self) -> Bounds {
            let rect = self.canvas.get_bounding_client_rect();
            Bounds::new(rect.width() as f32, rect.height() as f32)
        }

        fn handle(&mut self, action: Action) {
            let bounds = self.bounds();
            self.game.handle(action, bounds);

            if action == Action::ToggleMute {
                self.settings.muted = self.game.state().muted;
                self.settings.save();
            }
            self.update_buttons();
        }

        fn frame(&mut self, time: f64) {
            let bounds = self.bounds();

            if self.demo {
                let state = self.game.state();
                let restart = matches!(state.phase, GamePhase::Menu | GamePhase::Dead);
                if restart || autopilot::wants_flap(state, bounds) {
                    self.game.handle(Action::Flap, bounds);
                }
            }

            self.game.frame(time, bounds);

            if let Ok(json) = serde_json::to_string(&self.game.snapshot(bounds)) {
                present_frame(&json);
            }
        }

        /// Reflect pause/mute state on the toolbar buttons
        fn update_buttons(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.game.state();
            if let Some(btn) = document.get_element_by_id("btnPause") {
                let pressed = state.phase == GamePhase::Paused;
                let _ = btn.set_attribute("aria-pressed", if pressed { "true" } else { "false" });
            }
            if let Some(btn) = document.get_element_by_id("btnMute") {
                let _ = btn.set_attribute("aria-pressed", if state.muted { "true" } else { "false" });
            }
        }

        /// Auto-pause when the player looks away
        fn auto_pause(&mut self, reason: &str) {
            if self.settings.pause_on_blur && self.game.state().phase == GamePhase::Playing {
                self.handle(Action::TogglePause);
                log::info!("Auto-paused ({})", reason);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Roket starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let tuning = Tuning::load();

        let mut audio = AudioManager::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);

        let rect = canvas.get_bounding_client_rect();
        let bounds = Bounds::new(rect.width() as f32, rect.height() as f32);
        let seed = js_sys::Date::now() as u64;

        let mut game = Game::new(
            seed,
            tuning,
            bounds,
            Some(Box::new(LocalStorageHighScore)),
            Some(Box::new(audio)),
        );
        game.set_muted(settings.muted);

        let web = Rc::new(RefCell::new(WebGame {
            game,
            canvas: canvas.clone(),
            settings,
            demo: false,
        }));
        web.borrow().update_buttons();

        setup_input_handlers(&canvas, web.clone());
        setup_buttons(web.clone());
        setup_auto_pause(web.clone());

        request_animation_frame(web);

        log::info!("Flappy Roket running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, web: Rc<RefCell<WebGame>>) {
        // Pointer press (mouse, touch, pen) - flap
        {
            let web = web.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                web.borrow_mut().handle(Action::Flap);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if code == "KeyI" {
                    let mut w = web.borrow_mut();
                    w.demo = !w.demo;
                    log::info!("Demo mode: {}", w.demo);
                    return;
                }
                if let Some(action) = action_for_key(&code) {
                    if prevents_default(action) {
                        event.prevent_default();
                    }
                    web.borrow_mut().handle(action);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(web: Rc<RefCell<WebGame>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for (id, action) in [
            ("btnPause", Action::TogglePause),
            ("btnRestart", Action::Restart),
            ("btnMute", Action::ToggleMute),
        ] {
            if let Some(btn) = document.get_element_by_id(id) {
                let web = web.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    web.borrow_mut().handle(action);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_auto_pause(web: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let web = web.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    web.borrow_mut().auto_pause("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                web.borrow_mut().auto_pause("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(web: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(web, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(web: Rc<RefCell<WebGame>>, time: f64) {
        web.borrow_mut().frame(time);
        request_animation_frame(web);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Roket (native) starting...");
    log::info!("Native mode runs headless demo flights - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(2024);
    let best = headless::run_demo(seed, 5);
    println!("Best of 5 demo flights (seed {}): {}", seed, best);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flappy_roket::sim::{Action, Bounds, GamePhase, autopilot};
    use flappy_roket::{Game, MemoryHighScore, Tuning};

    const BOUNDS: Bounds = Bounds::new(800.0, 600.0);
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up on a flight after this much simulated time
    const MAX_FLIGHT_SECS: f32 = 120.0;

    /// Fly `runs` autopilot runs at 60 fps; returns the best score
    pub fn run_demo(seed: u64, runs: u32) -> u32 {
        let mut game = Game::new(
            seed,
            Tuning::default(),
            BOUNDS,
            Some(Box::new(MemoryHighScore::default())),
            None,
        );
        let mut now = 0.0;

        for run in 1..=runs {
            game.handle(Action::Restart, BOUNDS);

            while game.state().phase == GamePhase::Playing
                && game.state().since_start < MAX_FLIGHT_SECS
            {
                if autopilot::wants_flap(game.state(), BOUNDS) {
                    game.handle(Action::Flap, BOUNDS);
                }
                now += FRAME_MS;
                game.frame(now, BOUNDS);
            }

            log::info!(
                "Flight {}: score {} in {:.1}s",
                run,
                game.state().score,
                game.state().since_start
            );
        }

        game.state().high_score
    }
}
