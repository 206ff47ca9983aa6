//! Game loop errors

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopError {
    /// A tick or restart arrived before `start`.
    #[error("game loop has not been started")]
    NotStarted,

    #[error("session task has stopped")]
    SessionClosed,

    #[error("session task panicked")]
    TaskFailed,
}
