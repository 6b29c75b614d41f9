use nftsync_types::Stream;
use sqlx::postgres::PgPool;

use crate::error::StoreError;

/// Reads the last durably committed block for `stream`, or `None` if this
/// stream has never advanced (fresh database — the caller should fall back
/// to a configured genesis block).
pub async fn get(pool: &PgPool, stream: Stream) -> Result<Option<u64>, StoreError> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT block_number FROM watermark WHERE stream = $1")
        .bind(stream.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(block,)| block as u64))
}

/// Advances `stream`'s watermark to `block_number`. Callers are responsible
/// for only calling this with a value that never regresses.
pub async fn set(pool: &PgPool, stream: Stream, block_number: u64) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        INSERT INTO watermark (stream, block_number)
        VALUES ($1, $2)
        ON CONFLICT (stream) DO UPDATE SET block_number = EXCLUDED.block_number
        "#
    )
    .bind(stream.as_str())
    .bind(block_number as i64)
    .execute(pool)
    .await?;

    Ok(())
}
