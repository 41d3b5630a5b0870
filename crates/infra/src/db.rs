//! Database connection management.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

const SCHEMA_SQL: &str = include_str!("store/sql/schema.sql");

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Create the `products` table when it does not exist yet.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA_SQL).execute(pool).await?;
    tracing::info!("products schema ready");
    Ok(())
}
