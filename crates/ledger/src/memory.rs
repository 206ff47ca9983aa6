//! In-memory ledger, used by tests and as a fallback when no database opens.

use std::cmp::Reverse;
use std::sync::{Mutex, MutexGuard};

use crate::error::{LedgerError, LedgerResult};
use crate::record::{now_ms, NewScore, ScoreRecord};
use crate::ScoreLedger;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    /// Insertion order.
    records: Vec<ScoreRecord>,
}

#[derive(Debug, Default)]
pub struct MemoryLedger {
    inner: Mutex<Inner>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> LedgerResult<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| LedgerError::Poisoned)
    }

    fn ranked(inner: &Inner) -> Vec<ScoreRecord> {
        let mut records = inner.records.clone();
        // Stable sort keeps insertion order between equal scores.
        records.sort_by_key(|r| Reverse(r.score));
        records
    }
}

impl ScoreLedger for MemoryLedger {
    fn insert(&self, entry: &NewScore) -> LedgerResult<ScoreRecord> {
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let record = ScoreRecord {
            id: inner.next_id,
            score: entry.score,
            player_name: entry.stored_player_name(),
            snake_length: entry.snake_length,
            speed_tier: entry.speed_tier.clone(),
            timestamp_ms: now_ms(),
            duration_ms: entry.duration_ms,
        };
        inner.records.push(record.clone());
        Ok(record)
    }

    fn top_n(&self, n: usize) -> LedgerResult<Vec<ScoreRecord>> {
        let inner = self.lock()?;
        let mut records = Self::ranked(&inner);
        records.truncate(n);
        Ok(records)
    }

    fn all(&self) -> LedgerResult<Vec<ScoreRecord>> {
        let inner = self.lock()?;
        Ok(Self::ranked(&inner))
    }

    fn highest_score(&self) -> LedgerResult<u32> {
        let inner = self.lock()?;
        Ok(inner.records.iter().map(|r| r.score).max().unwrap_or(0))
    }

    fn total_games(&self) -> LedgerResult<u64> {
        let inner = self.lock()?;
        Ok(inner.records.len() as u64)
    }

    fn average_score(&self) -> LedgerResult<f64> {
        let inner = self.lock()?;
        if inner.records.is_empty() {
            return Ok(0.0);
        }
        let sum: u64 = inner.records.iter().map(|r| r.score as u64).sum();
        Ok(sum as f64 / inner.records.len() as f64)
    }

    fn rank(&self, score: u32) -> LedgerResult<u32> {
        let inner = self.lock()?;
        let above = inner.records.iter().filter(|r| r.score > score).count();
        Ok(above as u32 + 1)
    }

    fn clear(&self) -> LedgerResult<usize> {
        let mut inner = self.lock()?;
        let rows = inner.records.len();
        inner.records.clear();
        Ok(rows)
    }
}
