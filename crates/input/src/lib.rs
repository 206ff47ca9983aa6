//! Input module.
//!
//! Turns raw terminal key events into [`crate::types::GameAction`]s and
//! debounces direction changes before they reach the game state. The gate is
//! clock-agnostic: callers pass the current time in milliseconds.

pub mod gate;
pub mod map;

pub use tui_snake_types as types;

pub use gate::{min_interval_ms, InputGate};
pub use map::{handle_key_event, should_quit};
