//! SQLite storage for score records

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, Row};

use crate::error::{LedgerError, LedgerResult};
use crate::record::{now_ms, NewScore, ScoreRecord};
use crate::{LedgerStats, ScoreLedger};

/// On-disk schema version, kept in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

const SELECT_COLUMNS: &str =
    "SELECT id, score, player_name, snake_length, speed_tier, timestamp_ms, duration_ms FROM scores";

/// SQLite-backed score ledger.
///
/// The connection sits behind a mutex, so every insert is visible to the next
/// query on the same ledger.
pub struct SqliteLedger {
    conn: Mutex<Connection>,
}

impl SqliteLedger {
    /// Open (or create) a ledger at the given database path
    pub fn open<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Create an in-memory ledger (for testing)
    pub fn in_memory() -> LedgerResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> LedgerResult<Self> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> LedgerResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| LedgerError::Poisoned)
    }

    fn query_records(conn: &Connection, limit: Option<usize>) -> LedgerResult<Vec<ScoreRecord>> {
        // Ties keep insertion order.
        let sql = format!("{} ORDER BY score DESC, id ASC LIMIT ?1", SELECT_COLUMNS);
        let limit = limit.map(|n| n.min(i64::MAX as usize) as i64).unwrap_or(-1);

        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![limit], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

/// Create the schema on a fresh database and refuse newer ones.
fn init_schema(conn: &Connection) -> LedgerResult<()> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if version > SCHEMA_VERSION {
        return Err(LedgerError::UnsupportedSchema(version));
    }

    conn.execute(
        "CREATE TABLE IF NOT EXISTS scores (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            score INTEGER NOT NULL,
            player_name TEXT NOT NULL,
            snake_length INTEGER NOT NULL,
            speed_tier TEXT NOT NULL,
            timestamp_ms INTEGER NOT NULL,
            duration_ms INTEGER NOT NULL
        )",
        [],
    )?;

    // Index for leaderboard and rank queries
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_scores_score ON scores(score DESC)",
        [],
    )?;

    if version < SCHEMA_VERSION {
        conn.execute_batch(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))?;
    }

    Ok(())
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ScoreRecord> {
    Ok(ScoreRecord {
        id: row.get(0)?,
        score: row.get::<_, i64>(1)?.max(0) as u32,
        player_name: row.get(2)?,
        snake_length: row.get::<_, i64>(3)?.max(0) as u32,
        speed_tier: row.get(4)?,
        timestamp_ms: row.get(5)?,
        duration_ms: row.get::<_, i64>(6)?.max(0) as u64,
    })
}

impl ScoreLedger for SqliteLedger {
    fn insert(&self, entry: &NewScore) -> LedgerResult<ScoreRecord> {
        let player_name = entry.stored_player_name();
        let timestamp_ms = now_ms();
        let duration_ms = entry.duration_ms.min(i64::MAX as u64) as i64;

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO scores
             (score, player_name, snake_length, speed_tier, timestamp_ms, duration_ms)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.score as i64,
                player_name,
                entry.snake_length as i64,
                entry.speed_tier,
                timestamp_ms,
                duration_ms,
            ],
        )?;
        let id = conn.last_insert_rowid();

        tracing::debug!(id, score = entry.score, "score recorded");

        Ok(ScoreRecord {
            id,
            score: entry.score,
            player_name,
            snake_length: entry.snake_length,
            speed_tier: entry.speed_tier.clone(),
            timestamp_ms,
            duration_ms: duration_ms as u64,
        })
    }

    fn top_n(&self, n: usize) -> LedgerResult<Vec<ScoreRecord>> {
        let conn = self.lock()?;
        Self::query_records(&conn, Some(n))
    }

    fn all(&self) -> LedgerResult<Vec<ScoreRecord>> {
        let conn = self.lock()?;
        Self::query_records(&conn, None)
    }

    fn highest_score(&self) -> LedgerResult<u32> {
        let conn = self.lock()?;
        let high: i64 = conn.query_row("SELECT COALESCE(MAX(score), 0) FROM scores", [], |row| {
            row.get(0)
        })?;
        Ok(high.max(0) as u32)
    }

    fn total_games(&self) -> LedgerResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM scores", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn average_score(&self) -> LedgerResult<f64> {
        let conn = self.lock()?;
        let avg: f64 = conn.query_row("SELECT COALESCE(AVG(score), 0.0) FROM scores", [], |row| {
            row.get(0)
        })?;
        Ok(avg)
    }

    fn rank(&self, score: u32) -> LedgerResult<u32> {
        let conn = self.lock()?;
        let rank: i64 = conn.query_row(
            "SELECT COUNT(*) + 1 FROM scores WHERE score > ?1",
            params![score as i64],
            |row| row.get(0),
        )?;
        Ok(rank as u32)
    }

    fn clear(&self) -> LedgerResult<usize> {
        let conn = self.lock()?;
        let rows = conn.execute("DELETE FROM scores", [])?;
        tracing::info!(rows = rows as u64, "score ledger cleared");
        Ok(rows)
    }

    fn stats(&self) -> LedgerResult<LedgerStats> {
        let conn = self.lock()?;
        let stats = conn.query_row(
            "SELECT COUNT(*), COALESCE(MAX(score), 0), COALESCE(AVG(score), 0.0) FROM scores",
            [],
            |row| {
                Ok(LedgerStats {
                    total_games: row.get::<_, i64>(0)? as u64,
                    highest_score: row.get::<_, i64>(1)?.max(0) as u32,
                    average_score: row.get(2)?,
                })
            },
        )?;
        Ok(stats)
    }
}
