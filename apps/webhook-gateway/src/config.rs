use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result, bail};

pub const DEFAULT_NATS_URL: &str = "nats://127.0.0.1:4222";
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Process-wide settings, loaded once at startup and never mutated.
#[derive(Clone)]
pub struct GatewayConfig {
    pub webhook_secret: String,
    pub queue_subject: String,
    pub nats_url: String,
    pub addr: SocketAddr,
    pub request_timeout: Duration,
    pub max_body_bytes: usize,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("webhook_secret", &"<redacted>")
            .field("queue_subject", &self.queue_subject)
            .field("nats_url", &self.nats_url)
            .field("addr", &self.addr)
            .field("request_timeout", &self.request_timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

impl GatewayConfig {
    /// Config with the two required values and defaults for the rest.
    pub fn new(webhook_secret: impl Into<String>, queue_subject: impl Into<String>) -> Self {
        Self {
            webhook_secret: webhook_secret.into(),
            queue_subject: queue_subject.into(),
            nats_url: DEFAULT_NATS_URL.to_string(),
            addr: DEFAULT_BIND
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8080))),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`. A missing secret or queue subject is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_secret = required(&lookup, "WEBHOOK_SECRET")?;
        let queue_subject = required(&lookup, "QUEUE_SUBJECT")?;
        let mut config = Self::new(webhook_secret, queue_subject);

        if let Some(url) = optional(&lookup, "NATS_URL") {
            config.nats_url = url;
        }
        if let Some(bind) = optional(&lookup, "BIND") {
            config.addr = bind
                .parse()
                .with_context(|| format!("invalid BIND address `{bind}`"))?;
        }
        if let Some(raw) = optional(&lookup, "REQUEST_TIMEOUT_SECS") {
            let secs: u64 = raw
                .parse()
                .with_context(|| format!("invalid REQUEST_TIMEOUT_SECS `{raw}`"))?;
            if secs == 0 {
                bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
            }
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = optional(&lookup, "MAX_BODY_BYTES") {
            let limit: usize = raw
                .parse()
                .with_context(|| format!("invalid MAX_BODY_BYTES `{raw}`"))?;
            if limit == 0 {
                bail!("MAX_BODY_BYTES must be greater than zero");
            }
            config.max_body_bytes = limit;
        }
        Ok(config)
    }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match optional(lookup, key) {
        Some(value) => Ok(value),
        None => bail!("{key} must be set"),
    }
}
