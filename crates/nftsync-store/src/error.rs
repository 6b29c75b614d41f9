#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database connection error: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to run pending migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("value {0} does not fit the column it targets")]
    ValueOutOfRange(String)
}
