//! The floor-price aggregator (§4.7): a producer handle the order pipeline
//! uses to announce a collection's price changed, and the consumer that
//! recomputes and persists the new floor in response.

pub mod consumer;
pub mod error;
pub mod producer;

pub use consumer::{recompute_floor_price, FloorPriceConsumer};
pub use error::FloorPriceError;
pub use producer::Producer;
