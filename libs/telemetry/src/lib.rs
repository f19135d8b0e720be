//! Tracing setup shared by the gateway binaries.
//! JSON logs by default, optional OTLP export when `ENABLE_OTEL` and an endpoint are set.

use anyhow::Result;

mod config;
mod tracing_init;

pub use config::{TelemetryConfig, TelemetryProtocol};
pub use tracing_init::init_telemetry;

/// Installs the subscriber configured from the process environment and `RUST_LOG`.
pub fn install(service_name: &str, service_version: &str) -> Result<()> {
    init_telemetry(TelemetryConfig::from_env(service_name, service_version))
}
