//! Session-store migration command.
//!
//! # Usage
//!
//! ```bash
//! gondola-cli migrate sessions
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `SQLite` URL for the session store
//!   (default: sqlite:gondola.db)

use tracing::info;

use gondola_storefront::db;
use tower_sessions_sqlx_store::SqliteStore;

/// Create the tower-sessions table in the configured `SQLite` database.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database cannot be opened or the table
/// cannot be created.
pub async fn sessions() -> Result<(), sqlx::Error> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:gondola.db".to_string());

    info!(url = %database_url, "Connecting to session store");
    let pool = db::create_pool(&database_url).await?;

    info!("Creating tower_sessions table");
    let store = SqliteStore::new(pool);
    store.migrate().await?;

    info!("Session store migration complete");
    Ok(())
}
