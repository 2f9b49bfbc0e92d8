//! Database operations for the storefront session store.
//!
//! The storefront keeps no product or order data locally - the catalog
//! document is the source of truth for products. The `SQLite` database
//! holds a single table:
//!
//! - `tower_sessions` - the persisted per-browser key-value store (cart
//!   and preference slots)
//!
//! The table is created via:
//! ```bash
//! cargo run -p gondola-cli -- migrate sessions
//! ```

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created on first use. WAL mode and a busy timeout
/// keep concurrent session writes from tripping over "database is locked".
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is malformed or the database cannot be
/// opened.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(opts)
        .await
}
