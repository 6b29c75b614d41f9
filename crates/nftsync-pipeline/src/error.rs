#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("rpc pool error: {0}")]
    Pool(#[from] nftsync_rpc::PoolError),

    #[error("decode error: {0}")]
    Decode(#[from] nftsync_decode::DecodeError),

    #[error("store error: {0}")]
    Store(#[from] nftsync_store::StoreError),

    #[error("floor-price bus error: {0}")]
    FloorPrice(#[from] nftsync_floorprice::FloorPriceError),

    #[error("metadata fetch failed: {0}")]
    MetadataFetch(String),

    #[error("safe block {safe} is behind the current watermark {watermark} for stream {stream}")]
    WatermarkRegression { stream: &'static str, watermark: u64, safe: u64 }
}
