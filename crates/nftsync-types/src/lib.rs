//! Domain types shared by every layer of the sync engine: the row-shaped
//! records the store persists, the decoded chain events the pipelines
//! consume, and the typed configuration the binary loads at startup.

pub mod clock;
pub mod config;
pub mod event;
pub mod floor_price;
pub mod nft;
pub mod order;
pub mod watermark;

pub use config::{Config, ConfigError};
pub use event::{
    CrossValidated, MintEvent, OrderCancelledEvent, OrderCreatedEvent, OrderEventKind, OrderFilledEvent
};
pub use floor_price::FloorPrice;
pub use nft::{Item, MetadataAttribute, Nft, TokenMetadata};
pub use order::{Order, OrderStatus, OrderType};
pub use watermark::Stream;
