//! Document slot repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Store one serialized document body per storage key.
//! - Expose a per-key revision counter so other stores sharing the same
//!   database can detect external writes.
//!
//! # Invariants
//! - `save` is an upsert: the first write creates revision 1, each later
//!   write increments it by one.
//! - Keys are trimmed and must not be empty.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for document slot operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    EmptyKey,
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::EmptyKey => write!(f, "storage key must not be empty"),
            Self::InvalidData(message) => write!(f, "invalid persisted document data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::EmptyKey => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// One persisted document body with its revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub body: String,
    pub revision: i64,
}

/// Persisted slot interface consumed by `ResumeStore`.
pub trait DocumentRepository {
    fn load(&self, key: &str) -> RepoResult<Option<StoredDocument>>;
    /// Writes `body` under `key` and returns the new revision.
    fn save(&self, key: &str, body: &str) -> RepoResult<i64>;
    fn revision(&self, key: &str) -> RepoResult<Option<i64>>;
}

/// SQLite-backed document slots.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn load(&self, key: &str) -> RepoResult<Option<StoredDocument>> {
        let key = normalize_key(key)?;
        let stored = self
            .conn
            .query_row(
                "SELECT body, revision FROM documents WHERE key = ?1;",
                [key],
                |row| {
                    Ok(StoredDocument {
                        body: row.get("body")?,
                        revision: row.get("revision")?,
                    })
                },
            )
            .optional()?;

        if let Some(document) = &stored {
            if document.revision < 1 {
                return Err(RepoError::InvalidData(format!(
                    "invalid revision `{}` for key `{key}`",
                    document.revision
                )));
            }
        }

        Ok(stored)
    }

    fn save(&self, key: &str, body: &str) -> RepoResult<i64> {
        let key = normalize_key(key)?;
        let revision = self.conn.query_row(
            "INSERT INTO documents (key, body, revision)
             VALUES (?1, ?2, 1)
             ON CONFLICT(key) DO UPDATE SET
                body = excluded.body,
                revision = documents.revision + 1,
                updated_at = (strftime('%s', 'now') * 1000)
             RETURNING revision;",
            params![key, body],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(revision)
    }

    fn revision(&self, key: &str) -> RepoResult<Option<i64>> {
        let key = normalize_key(key)?;
        let revision = self
            .conn
            .query_row(
                "SELECT revision FROM documents WHERE key = ?1;",
                [key],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(revision)
    }
}

fn normalize_key(key: &str) -> RepoResult<&str> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(RepoError::EmptyKey);
    }
    Ok(trimmed)
}
