//! Physical input bindings
//!
//! Maps `KeyboardEvent.code` values onto logical actions. Pointer presses are
//! always a flap and are wired directly by the web glue.

use crate::sim::Action;

/// Logical action for a keyboard code, if the key is bound
pub fn action_for_key(code: &str) -> Option<Action> {
    match code {
        "Space" | "ArrowUp" | "KeyW" => Some(Action::Flap),
        "KeyP" => Some(Action::TogglePause),
        "KeyM" => Some(Action::ToggleMute),
        "KeyR" | "Enter" => Some(Action::Restart),
        _ => None,
    }
}

/// Whether the browser's default handling should be suppressed
///
/// Only flap keys are swallowed (Space would otherwise scroll the page).
pub fn prevents_default(action: Action) -> bool {
    action == Action::Flap
}
