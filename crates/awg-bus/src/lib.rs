//! Queue client used by the gateway to hand validated webhooks to downstream workers.
//!
//! [`NatsQueueClient`] publishes to a JetStream subject and waits for the stream to
//! acknowledge the message; [`InMemoryQueueClient`] records messages for tests and
//! local runs.

use async_nats::jetstream;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

#[derive(thiserror::Error, Debug)]
pub enum BusError {
    #[error("failed to encode queue message: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Publish(#[from] anyhow::Error),
}

/// Narrow enqueue capability. Returns the queue's acknowledgment id.
#[async_trait]
pub trait QueueClient: Send + Sync {
    async fn enqueue(&self, body: Value) -> Result<String, BusError>;
}

pub struct NatsQueueClient {
    jetstream: jetstream::Context,
    subject: String,
}

impl NatsQueueClient {
    pub fn new(client: async_nats::Client, subject: impl Into<String>) -> Self {
        Self {
            jetstream: jetstream::new(client),
            subject: subject.into(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}

#[async_trait]
impl QueueClient for NatsQueueClient {
    async fn enqueue(&self, body: Value) -> Result<String, BusError> {
        let bytes = serde_json::to_vec(&body)?;
        let ack = self
            .jetstream
            .publish(self.subject.clone(), bytes.into())
            .await
            .map_err(|err| BusError::Publish(anyhow::Error::new(err)))?
            .await
            .map_err(|err| BusError::Publish(anyhow::Error::new(err)))?;
        Ok(format!("{}:{}", ack.stream, ack.sequence))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryQueueClient {
    enqueued: Arc<Mutex<Vec<Value>>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryQueueClient {
    pub async fn take_enqueued(&self) -> Vec<Value> {
        let mut guard = self.enqueued.lock().await;
        std::mem::take(&mut *guard)
    }

    pub async fn len(&self) -> usize {
        self.enqueued.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl QueueClient for InMemoryQueueClient {
    async fn enqueue(&self, body: Value) -> Result<String, BusError> {
        let mut guard = self.enqueued.lock().await;
        guard.push(body);
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("mem-{seq}"))
    }
}

pub fn to_value<T: serde::Serialize>(payload: &T) -> Result<Value, BusError> {
    serde_json::to_value(payload).map_err(BusError::from)
}
