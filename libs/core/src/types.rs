use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Origin identifier stamped on every queued message.
pub const ARGOCD_SOURCE: &str = "argocd";

/// Fields every Argo CD notification must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "event",
    "appName",
    "status",
    "health",
    "revision",
    "clusterId",
];

/// Validated Argo CD notification.
///
/// Fields beyond the required six are kept in `extra` and serialized back inline,
/// so the queued payload carries them verbatim.
///
/// ```
/// use awg_core::WebhookPayload;
///
/// let payload: WebhookPayload = serde_json::from_str(
///     r#"{"event":"sync","appName":"app1","status":"Healthy","health":{"status":"Healthy"},
///         "revision":"abc123","clusterId":"cluster-a","syncedBy":"bot"}"#,
/// )
/// .unwrap();
/// assert_eq!(payload.app_name, "app1");
/// assert_eq!(payload.extra["syncedBy"], "bot");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub event: String,
    pub app_name: String,
    pub status: String,
    pub health: Map<String, Value>,
    pub revision: String,
    pub cluster_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Message shape handed to the work queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DispatchEnvelope {
    pub source: String,
    pub cluster_id: String,
    pub payload: WebhookPayload,
    pub headers: DispatchHeaders,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DispatchHeaders {
    #[serde(rename = "x-request-id")]
    pub request_id: String,
}

impl DispatchEnvelope {
    pub fn new(payload: WebhookPayload, correlation_id: impl Into<String>) -> Self {
        Self {
            source: ARGOCD_SOURCE.to_string(),
            cluster_id: payload.cluster_id.clone(),
            payload,
            headers: DispatchHeaders {
                request_id: correlation_id.into(),
            },
        }
    }
}
