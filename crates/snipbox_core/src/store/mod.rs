//! Snippet storage operations backed by SQLite.
//!
//! The store is the sole gateway to persisted snippet data. Every read
//! enforces the liveness rule: rows whose expiry instant is not strictly in
//! the future are invisible, though they stay on disk (no purge step).

use crate::error::AppError;
use crate::models::snippet::Snippet;
use chrono::{Duration, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;

/// Number of rows returned by [`SnippetStore::latest`].
pub const LATEST_LIMIT: i64 = 10;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS snippets (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    title    TEXT NOT NULL,
    content  TEXT NOT NULL,
    created  TEXT NOT NULL,
    expires  TEXT NOT NULL
)";

/// Snippet store holding an owned connection pool.
///
/// The store keeps no state of its own between calls; each operation checks
/// a connection out of the pool for its duration and releases it on every
/// exit path. Cloning is cheap and shares the pool, so one store value can
/// be handed to any number of concurrent tasks.
#[derive(Clone)]
pub struct SnippetStore {
    pool: SqlitePool,
}

impl SnippetStore {
    /// Open (or create) the database at `path` and initialize the schema.
    ///
    /// # Returns
    /// A ready-to-use [`SnippetStore`].
    ///
    /// # Errors
    /// Returns an error when the database cannot be opened or the schema
    /// statement fails.
    pub async fn open(path: &str) -> Result<Self, AppError> {
        // Ensure the data directory exists
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await?;
        tracing::debug!("Opened snippet database at {}", path);
        Self::from_pool(pool).await
    }

    /// Open an in-memory database (for testing).
    ///
    /// The pool is pinned to a single connection so the whole store sees one
    /// in-memory database rather than one per checkout.
    ///
    /// # Errors
    /// Returns an error when the connection or schema statement fails.
    pub async fn in_memory() -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    /// Build a store from an existing pool, initializing the schema.
    ///
    /// # Errors
    /// Returns an error when the schema statement fails.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, AppError> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// One-round-trip connectivity check.
    ///
    /// Used by the server entrypoint as its fatal bootstrap probe; the store
    /// itself never treats a failure here as fatal.
    ///
    /// # Errors
    /// Returns an error when the database cannot be reached.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Fetch a live snippet by id.
    ///
    /// # Arguments
    /// - `id`: Row id to look up. Any non-matching value, including
    ///   non-positive ids, is a plain miss rather than an error.
    ///
    /// # Returns
    /// `Ok(Some(snippet))` when a row matches and is still live,
    /// `Ok(None)` otherwise.
    ///
    /// # Errors
    /// Returns an error when the underlying query fails.
    pub async fn get(&self, id: i64) -> Result<Option<Snippet>, AppError> {
        let snippet = sqlx::query_as::<_, Snippet>(
            "SELECT id, title, content, created, expires
             FROM snippets
             WHERE id = ?1 AND expires > ?2",
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(snippet)
    }

    /// Fetch the most recently created live snippets.
    ///
    /// Rows sharing an identical `created` instant come back in whatever
    /// relative order SQLite chooses; the sort key is `created` alone.
    ///
    /// # Returns
    /// Up to [`LATEST_LIMIT`] live snippets ordered by `created` descending;
    /// an empty collection when no live rows exist. A failure while
    /// streaming rows discards any partial result and surfaces the error.
    ///
    /// # Errors
    /// Returns an error when the underlying query fails.
    pub async fn latest(&self) -> Result<Vec<Snippet>, AppError> {
        let snippets = sqlx::query_as::<_, Snippet>(
            "SELECT id, title, content, created, expires
             FROM snippets
             WHERE expires > ?1
             ORDER BY created DESC
             LIMIT ?2",
        )
        .bind(Utc::now())
        .bind(LATEST_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(snippets)
    }

    /// Insert a new snippet and return its assigned id.
    ///
    /// Sets `created` to the current UTC instant and `expires` to
    /// `created + expires_in_secs`. A zero or negative lifetime persists a
    /// row that is already expired and therefore invisible to reads. The
    /// store accepts whatever text it is given; rejecting blank titles or
    /// content is the caller's concern.
    ///
    /// # Arguments
    /// - `title`: Snippet title.
    /// - `content`: Snippet body.
    /// - `expires_in_secs`: Lifetime in seconds relative to insertion.
    ///
    /// # Returns
    /// The auto-increment id of the new row.
    ///
    /// # Errors
    /// Returns `BadRequest` for lifetimes whose expiry instant cannot be
    /// represented. Returns an error when the write fails; single-statement
    /// atomicity is the engine's, so no partial row is left addressable.
    pub async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_in_secs: i64,
    ) -> Result<i64, AppError> {
        let created = Utc::now();
        let expires = Duration::try_seconds(expires_in_secs)
            .and_then(|lifetime| created.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Lifetime of {} seconds is out of range",
                    expires_in_secs
                ))
            })?;
        let result = sqlx::query(
            "INSERT INTO snippets (title, content, created, expires)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(title)
        .bind(content)
        .bind(created)
        .bind(expires)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }
}
