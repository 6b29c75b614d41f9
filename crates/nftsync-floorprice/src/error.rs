#[derive(Debug, thiserror::Error)]
pub enum FloorPriceError {
    #[error("failed to create kafka producer: {0}")]
    ProducerInit(#[source] rdkafka::error::KafkaError),

    #[error("failed to create kafka consumer: {0}")]
    ConsumerInit(#[source] rdkafka::error::KafkaError),

    #[error("failed to subscribe to topic {1}: {0}")]
    Subscribe(#[source] rdkafka::error::KafkaError, String),

    #[error("failed to publish floor-price-changed message: {0}")]
    Send(String),

    #[error("message payload was not a valid collection address: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Store(#[from] nftsync_store::StoreError)
}
