//! Linear request pipeline: authenticate, parse, check cluster, dispatch.
//!
//! Each stage only runs when the previous one succeeded; the first failure ends
//! the invocation with that stage's outcome.

use std::sync::Arc;

use awg_bus::QueueClient;
use awg_core::{IncomingRequest, IngestError, Outcome, check_cluster, validate_payload};
use awg_ingress_common::BearerAuthenticator;
use axum::http::HeaderMap;
use tracing::{debug, info, warn};

use crate::config::GatewayConfig;
use crate::dispatch::MessageDispatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Authenticating,
    ParsingPayload,
    CheckingCluster,
    Dispatching,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::Authenticating => "authenticating",
            Stage::ParsingPayload => "parsing_payload",
            Stage::CheckingCluster => "checking_cluster",
            Stage::Dispatching => "dispatching",
            Stage::Done => "done",
        }
    }
}

pub struct RequestPipeline {
    authenticator: BearerAuthenticator,
    dispatcher: MessageDispatcher,
}

impl RequestPipeline {
    pub fn new(config: &GatewayConfig, queue: Arc<dyn QueueClient>) -> Self {
        Self {
            authenticator: BearerAuthenticator::new(config.webhook_secret.clone()),
            dispatcher: MessageDispatcher::new(queue),
        }
    }

    pub async fn process(&self, request: &IncomingRequest, correlation_id: &str) -> Outcome {
        info!(
            headers = ?request.header_names(),
            body_bytes = request.body.len(),
            "received webhook"
        );
        let result = self.advance(request, correlation_id).await;
        enter(Stage::Done);
        match result {
            Ok(ack_id) => {
                debug!(%ack_id, "webhook pipeline finished");
                Outcome::Success
            }
            Err((stage, err)) => rejected(stage, &err),
        }
    }

    /// Answers a request whose body could not be buffered. Authentication
    /// still runs first.
    pub fn reject_unreadable_body(&self, headers: &HeaderMap, detail: &str) -> Outcome {
        let stage = enter(Stage::Authenticating);
        if let Err(err) = self.authenticator.authenticate(headers) {
            return rejected(stage, &err);
        }
        let stage = enter(Stage::ParsingPayload);
        debug!(%detail, "request body rejected by the host");
        rejected(stage, &IngestError::UnreadableBody)
    }

    async fn advance(
        &self,
        request: &IncomingRequest,
        correlation_id: &str,
    ) -> Result<String, (Stage, IngestError)> {
        let stage = enter(Stage::Authenticating);
        self.authenticator
            .authenticate(&request.headers)
            .map_err(|err| (stage, err))?;

        let stage = enter(Stage::ParsingPayload);
        let payload = validate_payload(&request.body).map_err(|err| (stage, err))?;

        let stage = enter(Stage::CheckingCluster);
        check_cluster(&request.headers, &payload).map_err(|err| (stage, err))?;

        let stage = enter(Stage::Dispatching);
        self.dispatcher
            .dispatch(payload, correlation_id)
            .await
            .map_err(|err| (stage, err))
    }
}

fn rejected(stage: Stage, err: &IngestError) -> Outcome {
    let outcome = err.outcome();
    warn!(
        stage = stage.as_str(),
        outcome = outcome.label(),
        reason = %err,
        "webhook rejected"
    );
    outcome
}

fn enter(stage: Stage) -> Stage {
    debug!(stage = stage.as_str(), "pipeline transition");
    stage
}
