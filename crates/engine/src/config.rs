//! Session settings.
//!
//! Settings are read once when a session starts. They come from environment
//! variables by default; tests hand in fixed values through
//! [`SettingsProvider`].

use std::env;

use crate::input::min_interval_ms;
use crate::types::{BoardSize, SpeedTier, DEFAULT_PLAYER_NAME, DEFAULT_SENSITIVITY};

pub const ENV_BOARD: &str = "SNAKE_BOARD";
pub const ENV_SPEED: &str = "SNAKE_SPEED";
pub const ENV_SENSITIVITY: &str = "SNAKE_SENSITIVITY";
pub const ENV_PLAYER: &str = "SNAKE_PLAYER";
pub const ENV_DB_PATH: &str = "SNAKE_DB_PATH";
pub const ENV_LOG_PATH: &str = "SNAKE_LOG_PATH";

pub const DEFAULT_DB_PATH: &str = "snake_scores.db";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub board: BoardSize,
    pub tier: SpeedTier,
    /// Higher means turns are accepted closer together.
    pub sensitivity: f32,
    pub player_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardSize::default(),
            tier: SpeedTier::default(),
            sensitivity: DEFAULT_SENSITIVITY,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup. Unknown or malformed values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let board = lookup(ENV_BOARD)
            .and_then(|s| BoardSize::from_str(&s))
            .unwrap_or(defaults.board);

        let tier = lookup(ENV_SPEED)
            .and_then(|s| SpeedTier::from_str(&s))
            .unwrap_or(defaults.tier);

        let sensitivity = lookup(ENV_SENSITIVITY)
            .and_then(|s| s.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(defaults.sensitivity);

        let player_name = lookup(ENV_PLAYER)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.player_name);

        Self {
            board,
            tier,
            sensitivity,
            player_name,
        }
    }

    /// Debounce interval for direction changes.
    pub fn min_input_interval_ms(&self) -> u64 {
        min_interval_ms(self.sensitivity)
    }
}

/// Source of settings, consulted at session start.
pub trait SettingsProvider: Send + Sync {
    fn settings(&self) -> Settings;
}

impl SettingsProvider for Settings {
    fn settings(&self) -> Settings {
        self.clone()
    }
}

/// Reads the `SNAKE_*` environment variables on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl SettingsProvider for EnvSettings {
    fn settings(&self) -> Settings {
        Settings::from_env()
    }
}
