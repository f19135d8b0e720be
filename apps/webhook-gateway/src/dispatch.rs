use std::sync::Arc;

use awg_bus::{QueueClient, to_value};
use awg_core::{DispatchEnvelope, IngestError, WebhookPayload};
use awg_ingress_common::record_enqueued;
use tracing::{error, info};

/// Wraps a validated payload in a [`DispatchEnvelope`] and hands it to the queue.
pub struct MessageDispatcher {
    queue: Arc<dyn QueueClient>,
}

impl MessageDispatcher {
    pub fn new(queue: Arc<dyn QueueClient>) -> Self {
        Self { queue }
    }

    /// Returns the queue acknowledgment id. Failures keep their cause for logs;
    /// the client only ever sees the generic enqueue message.
    pub async fn dispatch(
        &self,
        payload: WebhookPayload,
        correlation_id: &str,
    ) -> Result<String, IngestError> {
        let envelope = DispatchEnvelope::new(payload, correlation_id);
        let cluster_id = envelope.cluster_id.as_str();

        let body = to_value(&envelope).map_err(|err| {
            error!(error = %err, %cluster_id, "failed to encode dispatch envelope");
            IngestError::Dispatch(err)
        })?;

        match self.queue.enqueue(body).await {
            Ok(ack_id) => {
                info!(%ack_id, %cluster_id, app = %envelope.payload.app_name, "message sent to queue");
                record_enqueued(cluster_id);
                Ok(ack_id)
            }
            Err(err) => {
                error!(error = %err, details = ?err, %cluster_id, "failed to enqueue webhook");
                Err(IngestError::Dispatch(err))
            }
        }
    }
}
