use http::HeaderMap;

use crate::error::{ConsistencyFailure, IngestError};
use crate::types::WebhookPayload;

pub const CLUSTER_ID_HEADER: &str = "x-cluster-id";

/// Checks that the `X-Cluster-Id` header names the same cluster as the payload.
///
/// Header lookup is case-insensitive; the value comparison is exact and
/// byte-wise, so non-ASCII ids match their UTF-8 encoding.
pub fn check_cluster(headers: &HeaderMap, payload: &WebhookPayload) -> Result<(), IngestError> {
    let asserted = headers
        .get(CLUSTER_ID_HEADER)
        .filter(|value| !value.is_empty())
        .ok_or(IngestError::Consistency(ConsistencyFailure::MissingHeader))?;

    if asserted.as_bytes() != payload.cluster_id.as_bytes() {
        return Err(IngestError::Consistency(ConsistencyFailure::Mismatch));
    }
    Ok(())
}
