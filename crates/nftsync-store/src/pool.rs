use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::StoreError;

/// Opens a connection pool against `dsn` and runs every pending migration in
/// `migrations/` before returning it, so callers never race a fresh database.
pub async fn connect(dsn: &str) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new().max_connections(10).connect(dsn).await.map_err(StoreError::Connect)?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
