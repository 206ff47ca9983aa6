//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental value types used throughout the
//! application. All types are plain data with no external dependencies, so they
//! can be used from the simulation core, the loop scheduler, the ledger and the
//! terminal front-end alike.
//!
//! # Coordinates
//!
//! The grid is addressed with `(x, y)` where `x` grows to the right and `y`
//! grows downwards. Valid cells are `[0, width) × [0, height)`.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `PAUSE_POLL_MS` | 100 | Re-check delay while paused or finished |
//! | `MIN_INPUT_INTERVAL_MS` | 50 | Lower clamp for the direction debounce |
//! | `MAX_INPUT_INTERVAL_MS` | 300 | Upper clamp for the direction debounce |
//! | `SENSITIVITY_BASE_MS` | 150 | Debounce at sensitivity 1.0 |
//!
//! # Speed Tiers
//!
//! | Tier | Start | Step | Floor |
//! |------|-------|------|-------|
//! | Beginner | 500ms | 10ms | 200ms |
//! | Normal | 350ms | 15ms | 120ms |
//! | Expert | 250ms | 20ms | 80ms |
//!
//! # Examples
//!
//! ```
//! use tui_snake_types::{Direction, Position, SpeedTier};
//!
//! let p = Position::new(3, 4).step(Direction::Up);
//! assert_eq!(p, Position::new(3, 3));
//!
//! assert_eq!(Direction::Left.opposite(), Direction::Right);
//! assert_eq!(SpeedTier::from_str("expert"), Some(SpeedTier::EXPERT));
//! ```

/// Poll delay used while the session is paused or over (milliseconds).
pub const PAUSE_POLL_MS: u64 = 100;

/// Direction debounce clamp (milliseconds).
pub const MIN_INPUT_INTERVAL_MS: u64 = 50;
pub const MAX_INPUT_INTERVAL_MS: u64 = 300;

/// Debounce interval at sensitivity 1.0 (milliseconds).
pub const SENSITIVITY_BASE_MS: f32 = 150.0;

/// Default control sensitivity.
pub const DEFAULT_SENSITIVITY: f32 = 1.0;

/// Maximum stored player name length, in characters.
pub const PLAYER_NAME_MAX_CHARS: usize = 10;

/// Player name used when none is configured.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// A cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Movement direction of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Grid offset for one step (`y` grows downwards).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Playfield dimensions.
///
/// Boards smaller than 5x5 are allowed but not very playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSize {
    pub width: u16,
    pub height: u16,
}

impl BoardSize {
    pub const SMALL: BoardSize = BoardSize::new(15, 20);
    pub const MEDIUM: BoardSize = BoardSize::new(20, 30);
    pub const LARGE: BoardSize = BoardSize::new(25, 35);

    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, p: Position) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width as i32 && p.y < self.height as i32
    }

    /// The cell the snake spawns on.
    pub fn center(&self) -> Position {
        Position::new(self.width as i32 / 2, self.height as i32 / 2)
    }

    /// Parse a preset name (`small`, `medium`, `large`) or an explicit `WxH`.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "small" => return Some(Self::SMALL),
            "medium" => return Some(Self::MEDIUM),
            "large" => return Some(Self::LARGE),
            _ => {}
        }
        let (w, h) = s.split_once('x')?;
        let width: u16 = w.trim().parse().ok()?;
        let height: u16 = h.trim().parse().ok()?;
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self::new(width, height))
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::MEDIUM
    }
}

/// Named speed configuration driving the tick interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpeedTier {
    pub label: &'static str,
    pub start_interval_ms: u64,
    pub decrement_per_step: u64,
    pub floor_ms: u64,
}

impl SpeedTier {
    pub const BEGINNER: SpeedTier = SpeedTier {
        label: "Beginner",
        start_interval_ms: 500,
        decrement_per_step: 10,
        floor_ms: 200,
    };
    pub const NORMAL: SpeedTier = SpeedTier {
        label: "Normal",
        start_interval_ms: 350,
        decrement_per_step: 15,
        floor_ms: 120,
    };
    pub const EXPERT: SpeedTier = SpeedTier {
        label: "Expert",
        start_interval_ms: 250,
        decrement_per_step: 20,
        floor_ms: 80,
    };

    pub const ALL: [SpeedTier; 3] = [Self::BEGINNER, Self::NORMAL, Self::EXPERT];

    /// Look up a preset by label (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.label.eq_ignore_ascii_case(s))
    }
}

impl Default for SpeedTier {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Player intents delivered by the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Turn(Direction),
    Pause,
    Restart,
}

impl GameAction {
    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            other => Direction::from_str(other).map(GameAction::Turn),
        }
    }
}
