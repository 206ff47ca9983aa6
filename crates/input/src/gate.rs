//! Direction debounce.
//!
//! Swipes and key repeats can deliver several turns inside one tick. The gate
//! lets a turn through only when enough time has passed since the previous
//! accepted one.

use crate::types::{
    Direction, MAX_INPUT_INTERVAL_MS, MIN_INPUT_INTERVAL_MS, SENSITIVITY_BASE_MS,
};

/// Minimum spacing between accepted turns for a sensitivity setting.
///
/// Higher sensitivity gives a shorter interval: `150ms / sensitivity`,
/// clamped to `[50, 300]`. Non-finite or non-positive values get the slowest
/// setting.
pub fn min_interval_ms(sensitivity: f32) -> u64 {
    if !sensitivity.is_finite() || sensitivity <= 0.0 {
        return MAX_INPUT_INTERVAL_MS;
    }
    let raw = (SENSITIVITY_BASE_MS / sensitivity) as u64;
    raw.clamp(MIN_INPUT_INTERVAL_MS, MAX_INPUT_INTERVAL_MS)
}

#[derive(Debug, Clone, Default)]
pub struct InputGate {
    last_accepted_at_ms: Option<u64>,
}

impl InputGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `direction` through if `min_interval_ms` has elapsed since the last
    /// accepted turn. The very first turn is always accepted.
    pub fn accept(&mut self, direction: Direction, now_ms: u64, min_interval_ms: u64) -> Option<Direction> {
        if let Some(last) = self.last_accepted_at_ms {
            if now_ms.saturating_sub(last) < min_interval_ms {
                return None;
            }
        }
        self.last_accepted_at_ms = Some(now_ms);
        Some(direction)
    }

    pub fn last_accepted_at_ms(&self) -> Option<u64> {
        self.last_accepted_at_ms
    }

    /// Forget the last accepted turn (new session).
    pub fn reset(&mut self) {
        self.last_accepted_at_ms = None;
    }
}
