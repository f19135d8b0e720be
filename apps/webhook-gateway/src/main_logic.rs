use std::sync::Arc;

use anyhow::{Context, Result};
use axum::serve;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::GatewayConfig;
use crate::{build_router, make_nats_queue};

/// Connects to the queue and serves the webhook endpoint until Ctrl-C.
pub async fn run(config: GatewayConfig) -> Result<()> {
    info!(config = ?config, "starting webhook gateway");
    let nats = async_nats::connect(&config.nats_url)
        .await
        .with_context(|| format!("failed to connect to NATS at {}", config.nats_url))?;
    let queue = make_nats_queue(nats, &config);
    info!(subject = %queue.subject(), "queue client ready");

    let router = build_router(config.clone(), Arc::new(queue));
    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!("webhook-gateway listening on {}", config.addr);

    serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
