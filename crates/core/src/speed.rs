//! Speed curve - maps the current score to the next tick interval
//!
//! Every `SCORE_PER_STEP` points the interval shrinks by the tier's decrement,
//! never dropping below the tier's floor.

use crate::types::SpeedTier;

/// Points needed per speed step.
pub const SCORE_PER_STEP: u32 = 3;

/// Number of speed steps reached at `score`.
pub fn speed_step(score: u32) -> u32 {
    score / SCORE_PER_STEP
}

/// Tick interval (milliseconds) to wait before the next advance.
///
/// Non-increasing in `score` and clamped at `tier.floor_ms`.
pub fn next_interval_ms(tier: &SpeedTier, score: u32) -> u64 {
    let decrease = (speed_step(score) as u64).saturating_mul(tier.decrement_per_step);
    tier.start_interval_ms
        .saturating_sub(decrease)
        .max(tier.floor_ms)
}
