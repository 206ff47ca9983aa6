//! Ledger errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Unsupported schema version {0} (expected at most {max})", max = crate::sqlite::SCHEMA_VERSION)]
    UnsupportedSchema(i64),

    #[error("Ledger lock poisoned")]
    Poisoned,

    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
