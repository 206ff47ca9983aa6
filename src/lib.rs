//! TUI Snake (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, the
//! integration tests and the benches can write `tui_snake::core::GameState`
//! and friends.

pub use tui_snake_core as core;
pub use tui_snake_engine as engine;
pub use tui_snake_input as input;
pub use tui_snake_ledger as ledger;
pub use tui_snake_term as term;
pub use tui_snake_types as types;
