use anyhow::Result;
use awg_gateway::{config::GatewayConfig, run};
use awg_telemetry::install as init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry("webhook-gateway", env!("CARGO_PKG_VERSION"))?;

    let config = GatewayConfig::from_env()?;
    run(config).await
}
