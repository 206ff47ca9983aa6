//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the snake rules and nothing else. It has no dependencies
//! on timers, terminals or storage, which keeps it:
//!
//! - **Deterministic**: the food RNG lives inside [`GameState`], so a seed
//!   plus a sequence of inputs always replays the same game
//! - **Immutable**: transitions return new snapshots instead of mutating
//! - **Portable**: usable from the terminal runner, the async session actor
//!   or a headless test
//!
//! # Module Structure
//!
//! - [`snake`]: the snake body and food entities
//! - [`game_state`]: initialize / advance / change-direction transitions
//! - [`speed`]: score to tick-interval curve
//! - [`rng`]: seeded LCG used for food placement
//!
//! # Example
//!
//! ```
//! use tui_snake_core::GameState;
//! use tui_snake_types::{BoardSize, Direction};
//!
//! let game = GameState::initialize(BoardSize::new(10, 10), 12345);
//! let game = game.change_direction(Direction::Down).advance();
//!
//! assert_eq!(game.snake().head().y, 6);
//! assert!(!game.terminal());
//! ```

pub mod game_state;
pub mod rng;
pub mod snake;
pub mod speed;

pub use tui_snake_types as types;

pub use game_state::{EndReason, GameState};
pub use rng::{seed_from_time, SimpleRng};
pub use snake::{Food, Snake};
pub use speed::{next_interval_ms, speed_step, SCORE_PER_STEP};
