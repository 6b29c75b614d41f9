use nftsync_store::watermark;
use nftsync_types::Stream;
use sqlx::PgPool;

use crate::error::PipelineError;

/// Thin persistence wrapper around the `watermark` table (§4.3). A stream
/// that has never advanced reports `0`, so `start = watermark + 1` begins at
/// block `1` on a fresh database rather than requiring a separate
/// genesis-block concept.
pub struct WatermarkManager<'a> {
    pool: &'a PgPool
}

impl<'a> WatermarkManager<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn current(&self, stream: Stream) -> Result<u64, PipelineError> {
        Ok(watermark::get(self.pool, stream).await?.unwrap_or(0))
    }

    /// Advances `stream` to `block`. Refuses to move a watermark backwards —
    /// callers only ever compute `safe` as a function of the current head,
    /// so a regression means a caller bug, not a legitimate retry.
    pub async fn advance(&self, stream: Stream, block: u64) -> Result<(), PipelineError> {
        let current = self.current(stream).await?;
        if block < current {
            return Err(PipelineError::WatermarkRegression { stream: stream.as_str(), watermark: current, safe: block });
        }
        watermark::set(self.pool, stream, block).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regression_error_reports_both_values() {
        let err = PipelineError::WatermarkRegression { stream: "mint", watermark: 100, safe: 90 };
        assert!(err.to_string().contains("100"));
        assert!(err.to_string().contains("90"));
    }
}
