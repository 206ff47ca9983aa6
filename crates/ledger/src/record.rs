//! Score record types

use serde::Serialize;

use crate::types::PLAYER_NAME_MAX_CHARS;

/// A completed game as submitted to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
    pub score: u32,
    pub player_name: String,
    pub snake_length: u32,
    pub speed_tier: String,
    pub duration_ms: u64,
}

impl NewScore {
    pub fn new(
        score: u32,
        player_name: impl Into<String>,
        snake_length: u32,
        speed_tier: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            score,
            player_name: player_name.into(),
            snake_length,
            speed_tier: speed_tier.into(),
            duration_ms,
        }
    }

    /// Player name cut to the stored maximum (counted in characters).
    pub fn stored_player_name(&self) -> String {
        truncate_name(&self.player_name)
    }
}

/// A persisted score. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreRecord {
    pub id: i64,
    pub score: u32,
    pub player_name: String,
    pub snake_length: u32,
    pub speed_tier: String,
    pub timestamp_ms: i64,
    pub duration_ms: u64,
}

impl ScoreRecord {
    /// Human-readable duration: `"1m 5s"` or `"42s"`.
    pub fn formatted_duration(&self) -> String {
        let seconds = self.duration_ms / 1000;
        let minutes = seconds / 60;
        let remaining = seconds % 60;
        if minutes > 0 {
            format!("{}m {}s", minutes, remaining)
        } else {
            format!("{}s", remaining)
        }
    }

    /// Creation date in UTC, `YYYY-MM-DD HH:MM`.
    pub fn formatted_timestamp(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.timestamp_ms)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }

    /// True when every caller-supplied field matches `entry`.
    pub fn matches(&self, entry: &NewScore) -> bool {
        self.score == entry.score
            && self.player_name == entry.stored_player_name()
            && self.snake_length == entry.snake_length
            && self.speed_tier == entry.speed_tier
            && self.duration_ms == entry.duration_ms
    }
}

pub(crate) fn truncate_name(name: &str) -> String {
    name.chars().take(PLAYER_NAME_MAX_CHARS).collect()
}

/// Milliseconds since the Unix epoch.
pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
