/// Result of one pipeline invocation, produced by exactly one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Unauthorized(String),
    BadRequest(String),
    ServerError(String),
}

impl Outcome {
    /// Stable label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "enqueued",
            Outcome::Unauthorized(_) => "unauthorized",
            Outcome::BadRequest(_) => "bad_request",
            Outcome::ServerError(_) => "server_error",
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Outcome::Success => None,
            Outcome::Unauthorized(msg) | Outcome::BadRequest(msg) | Outcome::ServerError(msg) => {
                Some(msg)
            }
        }
    }
}
