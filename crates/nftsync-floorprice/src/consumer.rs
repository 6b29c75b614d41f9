use std::str::FromStr;

use alloy_primitives::Address;
use futures_util::StreamExt;
use nftsync_store::{floor_price, order};
use nftsync_types::{config::FloorPriceKafkaConfig, FloorPrice};
use rdkafka::{
    config::ClientConfig,
    consumer::{Consumer as _, StreamConsumer},
    message::Message
};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::error::FloorPriceError;

/// The floor-price aggregator (§4.7): one consumer bound to the
/// floor-price-changed topic, recomputing and persisting a collection's
/// floor on every message.
pub struct FloorPriceConsumer {
    inner: StreamConsumer,
    pool:  PgPool
}

impl FloorPriceConsumer {
    pub fn connect(config: &FloorPriceKafkaConfig, pool: PgPool) -> Result<Self, FloorPriceError> {
        let inner: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", "nftsync-floorprice")
            .set("enable.auto.commit", "true")
            .create()
            .map_err(FloorPriceError::ConsumerInit)?;
        inner.subscribe(&[config.topic.as_str()]).map_err(|err| FloorPriceError::Subscribe(err, config.topic.clone()))?;
        Ok(Self { inner, pool })
    }

    /// Runs the bounded cooperative consume loop until `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut stream = self.inner.stream();
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("floor-price consumer shutting down");
                    return;
                }
                message = stream.next() => {
                    let Some(message) = message else {
                        tracing::warn!("floor-price topic stream ended");
                        return;
                    };
                    match message {
                        Ok(message) => {
                            if let Err(err) = self.handle(&message).await {
                                tracing::warn!(error = %err, "failed to process floor-price-changed message");
                            }
                        }
                        Err(err) => tracing::warn!(error = %err, "kafka consume error")
                    }
                }
            }
        }
    }

    async fn handle(&self, message: &rdkafka::message::BorrowedMessage<'_>) -> Result<(), FloorPriceError> {
        let collection = parse_collection_payload(message.payload())?;
        recompute_floor_price(&self.pool, collection).await
    }
}

/// Parses a floor-price-changed message payload as a collection address.
fn parse_collection_payload(payload: Option<&[u8]>) -> Result<Address, FloorPriceError> {
    let payload = payload.ok_or_else(|| FloorPriceError::InvalidPayload("empty payload".into()))?;
    let payload = std::str::from_utf8(payload).map_err(|_| FloorPriceError::InvalidPayload("not utf-8".into()))?;
    Address::from_str(payload).map_err(|_| FloorPriceError::InvalidPayload(payload.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_address_payload() {
        let payload = b"0x000000000000000000000000000000000000aa";
        assert!(parse_collection_payload(Some(payload)).is_ok());
    }

    #[test]
    fn rejects_an_empty_payload() {
        assert!(matches!(parse_collection_payload(None), Err(FloorPriceError::InvalidPayload(_))));
    }

    #[test]
    fn rejects_a_malformed_address() {
        assert!(matches!(parse_collection_payload(Some(b"not-an-address")), Err(FloorPriceError::InvalidPayload(_))));
    }
}

/// Recomputes and persists `collection`'s floor price: the minimum `price`
/// over its `listed` orders, using decimal comparison. No write happens if
/// the collection currently has no listed orders.
pub async fn recompute_floor_price(pool: &PgPool, collection: Address) -> Result<(), FloorPriceError> {
    let Some(price) = order::min_listed_price(pool, collection).await? else {
        tracing::debug!(collection = %collection, "no listed orders, leaving floor price untouched");
        return Ok(());
    };

    floor_price::upsert(pool, &FloorPrice { collection, price }, nftsync_types::clock::unix_now()).await?;
    Ok(())
}
