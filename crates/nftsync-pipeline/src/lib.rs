//! The ingestion pipelines (§4.5, §4.6) and the scheduler that drives them
//! on their configured tickers (§4.3), all built on the RPC pool, decoders,
//! and store crates.

pub mod error;
pub mod mint;
pub mod order;
pub mod scheduler;
pub mod watermark_manager;

pub use error::PipelineError;
pub use mint::MintPipeline;
pub use order::OrderPipeline;
pub use scheduler::Scheduler;
pub use watermark_manager::WatermarkManager;
