use anyhow::{Context, Result};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};

use super::MIGRATION_001_INITIAL;

/// Raised when an insert hits the unique constraint on `usuarios.email`.
///
/// Carried inside an [`anyhow::Error`] so callers can tell a duplicate
/// account apart from any other storage failure with `downcast_ref`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Email already registered: {0}")]
pub struct DuplicateEmail(pub String);

/// Store handle shared by the account and ledger services.
///
/// Cloning is cheap: clones share the same connection pool. The handle is
/// opened with [`Repository::init`] and released with [`Repository::close`].
#[derive(Clone)]
pub struct Repository {
    pub(super) pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database {}", database_url))?;
        debug!(database_url, "connected to database");
        Ok(Self::new(pool))
    }

    /// Create the tables if they do not exist yet. Safe to run repeatedly.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Connect and migrate. Once this returns the store is ready to serve
    /// requests.
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        info!("database schema ready");
        Ok(repo)
    }

    /// Close every pooled connection. Pending queries finish first.
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("database pool closed");
    }
}

/// Build a SQLite URL for a file path, creating the file when missing.
pub fn sqlite_url(database_path: &str) -> String {
    format!("sqlite:{}?mode=rwc", database_path)
}
