use std::sync::Arc;
use std::time::Duration;

use awg_bus::QueueClient;
use awg_core::{ENQUEUE_FAILED, IncomingRequest, Outcome};
use awg_ingress_common::{
    RequestId, record_outcome, record_span_outcome, respond, start_ingress_span, with_request_id,
};
use axum::{
    Extension, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{Instrument, error};

use crate::config::GatewayConfig;
use crate::pipeline::RequestPipeline;

pub struct GatewayState {
    pub pipeline: RequestPipeline,
    pub request_timeout: Duration,
}

pub fn build_router_with_queue(config: GatewayConfig, queue: Arc<dyn QueueClient>) -> Router {
    let state = Arc::new(GatewayState {
        pipeline: RequestPipeline::new(&config, queue),
        request_timeout: config.request_timeout,
    });

    Router::new()
        .route("/webhook", post(receive_webhook))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(middleware::from_fn(with_request_id))
        .with_state(state)
}

async fn receive_webhook(
    State(state): State<Arc<GatewayState>>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let span = start_ingress_span(request_id.as_str());
    let outcome = match body {
        Ok(body) => {
            let request = IncomingRequest::new(headers, body);
            handle_webhook(&state, &request, request_id.as_str())
                .instrument(span.clone())
                .await
        }
        Err(rejection) => span.in_scope(|| {
            state
                .pipeline
                .reject_unreadable_body(&headers, &rejection.body_text())
        }),
    };
    record_span_outcome(&span, &outcome);
    record_outcome(&outcome);
    respond(&outcome)
}

/// Runs the pipeline within the invocation time budget. An invocation that
/// overruns it is reported as an enqueue failure.
pub async fn handle_webhook(
    state: &GatewayState,
    request: &IncomingRequest,
    request_id: &str,
) -> Outcome {
    match tokio::time::timeout(
        state.request_timeout,
        state.pipeline.process(request, request_id),
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(_) => {
            error!(
                timeout = ?state.request_timeout,
                "webhook invocation exceeded its time budget"
            );
            Outcome::ServerError(ENQUEUE_FAILED.to_string())
        }
    }
}

async fn healthz() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
