//! Cancellable tick timer with generation tokens.
//!
//! The timer itself does not sleep. It records when the next tick is due and
//! hands out a [`TickToken`]; whoever drives the loop (a terminal poll loop or
//! the async session actor) waits until `due_at_ms` and passes the token back.
//! Cancelling or re-arming bumps the generation, so a token from an earlier
//! arm can never fire into a newer session.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken {
    pub generation: u64,
    pub due_at_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TickTimer {
    generation: u64,
    pending: Option<TickToken>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the next tick `delay_ms` after `now_ms`, replacing any pending one.
    pub fn arm(&mut self, now_ms: u64, delay_ms: u64) -> TickToken {
        self.generation = self.generation.wrapping_add(1);
        let token = TickToken {
            generation: self.generation,
            due_at_ms: now_ms.saturating_add(delay_ms),
        };
        self.pending = Some(token);
        token
    }

    /// Drop the pending tick. Safe to call when nothing is pending.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
    }

    pub fn pending(&self) -> Option<TickToken> {
        self.pending
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The pending token if it is due at `now_ms`.
    pub fn due(&self, now_ms: u64) -> Option<TickToken> {
        self.pending.filter(|t| t.due_at_ms <= now_ms)
    }

    /// Consume `token` if it is the one currently pending.
    pub fn take_if_current(&mut self, token: TickToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
