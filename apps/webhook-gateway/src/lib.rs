pub mod config;
pub mod dispatch;
pub mod http;
mod main_logic;
pub mod pipeline;

use std::sync::Arc;

use crate::config::GatewayConfig;
pub use awg_bus::{BusError, InMemoryQueueClient, NatsQueueClient, QueueClient};
pub use main_logic::run;

/// Constructs the production queue client for the configured subject.
pub fn make_nats_queue(client: async_nats::Client, config: &GatewayConfig) -> NatsQueueClient {
    NatsQueueClient::new(client, config.queue_subject.clone())
}

/// Builds the gateway router around any queue client.
pub fn build_router<Q: QueueClient + 'static>(config: GatewayConfig, queue: Arc<Q>) -> axum::Router {
    http::build_router_with_queue(config, queue)
}
