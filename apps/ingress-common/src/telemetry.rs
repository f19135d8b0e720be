use awg_core::Outcome;
use metrics::counter;
use tracing::Span;

const REQUESTS_COUNTER: &str = "webhook_requests_total";
const ENQUEUED_COUNTER: &str = "webhook_enqueued_total";
const INGRESS_SPAN_NAME: &str = "ingress.webhook";

/// Counts one finished request by outcome label.
pub fn record_outcome(outcome: &Outcome) {
    counter!(REQUESTS_COUNTER, "outcome" => outcome.label()).increment(1);
}

pub fn record_enqueued(cluster_id: &str) {
    counter!(ENQUEUED_COUNTER, "cluster" => cluster_id.to_string()).increment(1);
}

/// Span wrapping a single webhook invocation; `outcome` is filled in on completion.
pub fn start_ingress_span(request_id: &str) -> Span {
    tracing::info_span!(
        INGRESS_SPAN_NAME,
        request_id = %request_id,
        outcome = tracing::field::Empty
    )
}

pub fn record_span_outcome(span: &Span, outcome: &Outcome) {
    span.record("outcome", outcome.label());
}
