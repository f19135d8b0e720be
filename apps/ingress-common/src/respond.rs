use awg_core::Outcome;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

/// Status code and JSON body for an outcome.
pub fn response_parts(outcome: &Outcome) -> (StatusCode, Value) {
    match outcome {
        Outcome::Success => (StatusCode::OK, json!({ "status": "enqueued" })),
        Outcome::Unauthorized(message) => (StatusCode::UNAUTHORIZED, json!({ "error": message })),
        Outcome::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
        Outcome::ServerError(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": message }),
        ),
    }
}

pub fn respond(outcome: &Outcome) -> Response {
    let (status, body) = response_parts(outcome);
    (status, Json(body)).into_response()
}
