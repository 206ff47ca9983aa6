//! Score ledger - durable history of finished games
//!
//! The ledger answers leaderboard and statistics queries over every recorded
//! game. It is exposed as the narrow [`ScoreLedger`] trait so the game loop can
//! be exercised against [`MemoryLedger`] while the binary uses [`SqliteLedger`].
//!
//! # Ordering
//!
//! Leaderboards are sorted by score, highest first. Equal scores keep the
//! order in which they were inserted.
//!
//! # Rank
//!
//! `rank(score)` is `1 + number of records with a strictly greater score`, so
//! it is at least 1 even on an empty ledger.
//!
//! # Example
//!
//! ```
//! use tui_snake_ledger::{MemoryLedger, NewScore, ScoreLedger};
//!
//! let ledger = MemoryLedger::new();
//! ledger.insert(&NewScore::new(42, "Ada", 43, "Normal", 61_000)).unwrap();
//!
//! assert_eq!(ledger.highest_score().unwrap(), 42);
//! assert_eq!(ledger.rank(42).unwrap(), 1);
//! assert_eq!(ledger.rank(10).unwrap(), 2);
//! ```

pub mod error;
pub mod memory;
pub mod record;
pub mod sqlite;

use std::sync::Arc;

pub use tui_snake_types as types;

pub use error::{LedgerError, LedgerResult};
pub use memory::MemoryLedger;
pub use record::{NewScore, ScoreRecord};
pub use sqlite::{SqliteLedger, SCHEMA_VERSION};

/// Aggregate statistics over the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LedgerStats {
    pub total_games: u64,
    pub highest_score: u32,
    pub average_score: f64,
}

/// Insert and query capabilities of a score store.
///
/// Implementations must make every completed `insert` visible to later
/// queries on the same instance.
pub trait ScoreLedger: Send + Sync {
    /// Persist a finished game. The name is truncated to 10 characters and the
    /// creation timestamp is assigned by the ledger.
    fn insert(&self, entry: &NewScore) -> LedgerResult<ScoreRecord>;

    /// Best `n` records.
    fn top_n(&self, n: usize) -> LedgerResult<Vec<ScoreRecord>>;

    /// Every record, in leaderboard order.
    fn all(&self) -> LedgerResult<Vec<ScoreRecord>>;

    /// Highest recorded score, 0 when empty.
    fn highest_score(&self) -> LedgerResult<u32>;

    fn total_games(&self) -> LedgerResult<u64>;

    /// Mean score, 0.0 when empty.
    fn average_score(&self) -> LedgerResult<f64>;

    fn rank(&self, score: u32) -> LedgerResult<u32>;

    /// Delete every record. Returns the number removed.
    fn clear(&self) -> LedgerResult<usize>;

    fn stats(&self) -> LedgerResult<LedgerStats> {
        Ok(LedgerStats {
            total_games: self.total_games()?,
            highest_score: self.highest_score()?,
            average_score: self.average_score()?,
        })
    }
}

impl<L: ScoreLedger + ?Sized> ScoreLedger for Arc<L> {
    fn insert(&self, entry: &NewScore) -> LedgerResult<ScoreRecord> {
        (**self).insert(entry)
    }

    fn top_n(&self, n: usize) -> LedgerResult<Vec<ScoreRecord>> {
        (**self).top_n(n)
    }

    fn all(&self) -> LedgerResult<Vec<ScoreRecord>> {
        (**self).all()
    }

    fn highest_score(&self) -> LedgerResult<u32> {
        (**self).highest_score()
    }

    fn total_games(&self) -> LedgerResult<u64> {
        (**self).total_games()
    }

    fn average_score(&self) -> LedgerResult<f64> {
        (**self).average_score()
    }

    fn rank(&self, score: u32) -> LedgerResult<u32> {
        (**self).rank(score)
    }

    fn clear(&self) -> LedgerResult<usize> {
        (**self).clear()
    }

    fn stats(&self) -> LedgerResult<LedgerStats> {
        (**self).stats()
    }
}
