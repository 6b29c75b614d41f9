use std::time::Duration;

use alloy_primitives::Address;
use nftsync_types::config::FloorPriceKafkaConfig;
use rdkafka::{
    config::ClientConfig,
    producer::{FutureProducer, FutureRecord}
};

use crate::error::FloorPriceError;

/// A cloneable handle to the floor-price-changed topic. `FutureProducer`
/// internally wraps a reference-counted librdkafka client, so cloning this
/// is cheap and every pipeline driver gets its own handle.
#[derive(Clone)]
pub struct Producer {
    inner: FutureProducer,
    topic: String
}

impl Producer {
    pub fn connect(config: &FloorPriceKafkaConfig) -> Result<Self, FloorPriceError> {
        let inner = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", "5000")
            .create()
            .map_err(FloorPriceError::ProducerInit)?;
        Ok(Self { inner, topic: config.topic.clone() })
    }

    /// Publishes a floor-price-changed notification keyed and payloaded by
    /// `collection`'s hex address, as in §4.6. Best-effort within librdkafka's
    /// own timeout; the caller logs and moves on rather than blocking the
    /// ingestion pipeline on the bus.
    pub async fn notify_floor_price_changed(&self, collection: Address) -> Result<(), FloorPriceError> {
        let payload = collection.to_string();
        let record = FutureRecord::to(&self.topic).key(&payload).payload(&payload);

        self.inner
            .send(record, Duration::from_secs(5))
            .await
            .map_err(|(err, _)| FloorPriceError::Send(err.to_string()))?;
        Ok(())
    }
}
