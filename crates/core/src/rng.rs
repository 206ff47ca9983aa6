//! RNG module - deterministic food placement
//!
//! A small LCG carried inside every `GameState` so that state transitions stay
//! pure: the same seed and the same inputs always produce the same game.

use crate::types::{BoardSize, Position};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Low bits of a power-of-two LCG have short periods; mix the high half down.
        self.state ^ (self.state >> 16)
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Uniformly pick a cell of `board`.
    pub fn next_cell(&mut self, board: BoardSize) -> Position {
        let x = self.next_range(board.width as u32) as i32;
        let y = self.next_range(board.height as u32) as i32;
        Position::new(x, y)
    }
}

/// Seed derived from the wall clock, for interactive sessions.
pub fn seed_from_time() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
