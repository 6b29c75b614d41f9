mod cli;

use std::sync::Arc;

use clap::Parser;
use cli::Cli;
use nftsync_floorprice::{FloorPriceConsumer, Producer};
use nftsync_pipeline::{MintPipeline, OrderPipeline, Scheduler};
use nftsync_rpc::NodePool;
use nftsync_types::Config;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    install_tracing(cli.log_filter.as_deref());

    let config = Config::load(&cli.config)?;
    tracing::info!(config = %cli.config, "configuration loaded");

    let rpc = Arc::new(NodePool::dial_all(&config.eth_nodes)?);
    tracing::info!(nodes = rpc.len(), "rpc pool dialed");

    let pool = nftsync_store::connect(&config.database.dsn).await?;
    tracing::info!("store connected and migrated");

    let floor_price_producer = Producer::connect(&config.floor_price_kafka)?;
    let floor_price_consumer = FloorPriceConsumer::connect(&config.floor_price_kafka, pool.clone())?;

    let mint = Arc::new(MintPipeline::new(pool.clone()));
    let order = Arc::new(OrderPipeline::new(pool.clone(), floor_price_producer));

    let scheduler = Arc::new(Scheduler::new(
        Arc::clone(&rpc),
        mint,
        order,
        pool,
        config.nft_contract_addresses(),
        config.order_contract_addresses(),
        config.sync.confirm_blocks
    ));

    let cancel = CancellationToken::new();

    let realtime_mint = tokio::spawn({
        let scheduler = Arc::clone(&scheduler);
        let cancel = cancel.clone();
        let period = std::time::Duration::from_secs(config.sync.realtime_interval);
        async move { scheduler.run_realtime_mint(period, cancel).await }
    });

    let polling_mint = tokio::spawn({
        let scheduler = Arc::clone(&scheduler);
        let cancel = cancel.clone();
        let period = std::time::Duration::from_secs(config.sync.polling_interval);
        async move { scheduler.run_polling_mint(period, cancel).await }
    });

    let polling_order = tokio::spawn({
        let scheduler = Arc::clone(&scheduler);
        let cancel = cancel.clone();
        let period = std::time::Duration::from_secs(config.sync.order_interval);
        async move { scheduler.run_polling_order(period, cancel).await }
    });

    let floor_price_task = tokio::spawn({
        let cancel = cancel.clone();
        async move { floor_price_consumer.run(cancel).await }
    });

    tokio::select! {
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received");
        }
        result = realtime_mint => log_unexpected_exit("realtime mint driver", result),
        result = polling_mint => log_unexpected_exit("polling mint driver", result),
        result = polling_order => log_unexpected_exit("polling order driver", result),
        result = floor_price_task => log_unexpected_exit("floor-price consumer", result),
    }

    cancel.cancel();
    tracing::info!("cancellation requested, exiting");
    Ok(())
}

fn install_tracing(log_filter: Option<&str>) {
    let filter = log_filter
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install sigterm handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn log_unexpected_exit(task: &str, result: Result<(), tokio::task::JoinError>) {
    match result {
        Ok(()) => tracing::warn!(task, "driver task exited unexpectedly"),
        Err(err) => tracing::error!(task, error = %err, "driver task panicked")
    }
}
