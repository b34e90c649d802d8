use sqlx::SqlitePool;

/// Run all database migrations (CREATE TABLE IF NOT EXISTS).
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // ═══════════════════════════════════════
    // TABLE: discounts
    // ═══════════════════════════════════════
    // The UNIQUE constraint on product_title is the authoritative guard
    // against duplicate titles; the service pre-check only exists for a
    // friendlier error message.
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS discounts (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            product_title       TEXT    NOT NULL UNIQUE,
            discount_percentage REAL    NOT NULL
                                CHECK(discount_percentage >= 0 AND discount_percentage <= 100)
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
