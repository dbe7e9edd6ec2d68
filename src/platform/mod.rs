//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing
//! - Input bindings
//! - Storage (LocalStorage on web)

pub mod input;
pub mod storage;
pub mod time;

pub use input::{action_for_key, prevents_default};
pub use time::FrameClock;
