//! # Order Store Connection
//!
//! Opens the SQLite file that holds orders, order items and store settings,
//! and hands out repositories over one shared pool.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new("titan.db")                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config)                                                 │
//! │       │  ├── open file (create if missing), WAL, synchronous=NORMAL    │
//! │       │  ├── build SqlitePool                                          │
//! │       │  └── apply embedded migrations (unless disabled)               │
//! │       ▼                                                                 │
//! │  db.orders()          ──► OrderRepository      ─┐                      │
//! │  db.order_items()     ──► OrderItemRepository  ─┼── clones of the pool │
//! │  db.store_settings()  ──► StoreSettingsRepository┘                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A report is read-heavy: the CLI issues its fetches back to back and a
//! dashboard may run several reports at once. WAL keeps those readers from
//! blocking the POS while it keeps writing orders.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::order::OrderRepository;
use crate::repository::order_item::OrderItemRepository;
use crate::repository::settings::StoreSettingsRepository;

// =============================================================================
// Configuration
// =============================================================================

/// How to open the order store.
///
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/titan/titan.db").max_connections(8);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file; created on first open.
    pub database_path: PathBuf,
    /// Default 4.
    pub max_connections: u32,
    /// Default 1.
    pub min_connections: u32,
    /// How long to wait for a free connection. Default 10 s.
    pub acquire_timeout: Duration,
    /// Idle connections are closed after this. Default 5 min.
    pub idle_timeout: Duration,
    /// Apply pending migrations while opening. Default true.
    pub run_migrations: bool,
}

impl DbConfig {
    /// Config for the file at `path` with default pool sizing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 4,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// A private in-memory store, migrated and empty. Used by tests.
    ///
    /// Pinned to a single connection: every SQLite `:memory:` connection is
    /// its own database.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the order store. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the store described by `config`.
    ///
    /// Fails with [`DbError::ConnectionFailed`] when the file cannot be
    /// opened and [`DbError::MigrationFailed`] when the schema cannot be
    /// brought up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening order store");

        let url = format!("sqlite://{}?mode=rwc", config.database_path.display());
        let options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Pool ready");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations. Safe to call repeatedly.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// The underlying pool, for queries no repository covers.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    pub fn order_items(&self) -> OrderItemRepository {
        OrderItemRepository::new(self.pool.clone())
    }

    pub fn store_settings(&self) -> StoreSettingsRepository {
        StoreSettingsRepository::new(self.pool.clone())
    }

    /// Closes every connection. Repositories handed out earlier stop working.
    pub async fn close(&self) {
        debug!("Closing order store");
        self.pool.close().await;
    }

    /// True when the store answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
