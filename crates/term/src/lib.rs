//! Terminal rendering for the snake game.
//!
//! Renders into a plain framebuffer (no widget toolkit) that is flushed to
//! the terminal with crossterm. Board cells are two columns wide.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Hud, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
