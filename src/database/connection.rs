use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

use super::migrations::run_migrations;
use crate::config::get_config;

/// Initialize the SQLite database with connection pooling.
///
/// - WAL mode for concurrent reads/writes
/// - Foreign keys enforcement
/// - Busy timeout to handle concurrent access
pub async fn init_db() -> Result<SqlitePool, Box<dyn std::error::Error>> {
    let config = get_config();
    let db_path = Path::new(&config.database.path);

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool_options = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(std::time::Duration::from_secs(
            config.database.connect_timeout_secs,
        ))
        .idle_timeout(std::time::Duration::from_secs(
            config.database.idle_timeout_secs,
        ));

    let pool = pool_options.connect_with(options).await?;

    run_migrations(&pool).await?;

    tracing::info!(
        min = config.database.min_connections,
        max = config.database.max_connections,
        db = %db_path.display(),
        "database connection pool initialized"
    );

    Ok(pool)
}

/// Health check for the database connection.
/// Returns Ok(()) if the database is reachable.
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").fetch_one(pool).await?;
    Ok(())
}
