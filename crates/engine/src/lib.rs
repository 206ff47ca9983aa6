//! Engine - timing, sessions and persistence glue
//!
//! Wraps the pure rules from `tui-snake-core` in a [`GameLoop`] that owns the
//! tick timer, the direction debounce and the score ledger, and optionally runs
//! it as a tokio task behind a [`SessionHandle`].
//!
//! ```
//! use tui_snake_engine::{GameLoop, Settings, TickOutcome};
//! use tui_snake_engine::ledger::MemoryLedger;
//! use tui_snake_engine::types::BoardSize;
//!
//! let mut game = GameLoop::new(Settings::default(), MemoryLedger::new()).with_seed(7);
//! let first = game.start(BoardSize::new(12, 12), 0);
//! let outcome = game.on_tick(first, first.due_at_ms).unwrap();
//! assert!(matches!(outcome, TickOutcome::Advanced { .. }));
//! ```

pub mod config;
pub mod error;
pub mod runtime;
pub mod scheduler;
pub mod timer;

pub use tui_snake_core as core;
pub use tui_snake_input as input;
pub use tui_snake_ledger as ledger;
pub use tui_snake_types as types;

pub use config::{
    EnvSettings, Settings, SettingsProvider, DEFAULT_DB_PATH, ENV_BOARD, ENV_DB_PATH,
    ENV_LOG_PATH, ENV_PLAYER, ENV_SENSITIVITY, ENV_SPEED,
};
pub use error::LoopError;
pub use runtime::{spawn_session, SessionCommand, SessionEvent, SessionHandle};
pub use scheduler::{GameLoop, Persisted, Restarted, SessionEnded, SessionSummary, TickOutcome};
pub use timer::{TickTimer, TickToken};
