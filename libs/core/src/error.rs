use std::fmt;

use awg_bus::BusError;

use crate::outcome::Outcome;

/// Client-facing message for every enqueue failure.
pub const ENQUEUE_FAILED: &str = "Failed to enqueue message";

/// Why a request failed, by stage. `Display` is the client-safe message.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("{0}")]
    Authentication(AuthFailure),
    #[error("Unable to read request body")]
    UnreadableBody,
    #[error("Invalid JSON payload")]
    MalformedPayload(#[source] serde_json::Error),
    #[error("Payload must be a JSON object")]
    NotAnObject,
    #[error("{0}")]
    SchemaValidation(SchemaViolations),
    #[error("{0}")]
    Consistency(ConsistencyFailure),
    #[error("Failed to enqueue message")]
    Dispatch(#[source] BusError),
}

impl IngestError {
    pub fn outcome(&self) -> Outcome {
        let message = self.to_string();
        match self {
            IngestError::Authentication(_) => Outcome::Unauthorized(message),
            IngestError::UnreadableBody
            | IngestError::MalformedPayload(_)
            | IngestError::NotAnObject
            | IngestError::SchemaValidation(_)
            | IngestError::Consistency(_) => Outcome::BadRequest(message),
            IngestError::Dispatch(_) => Outcome::ServerError(message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    #[error("Missing Authorization header")]
    MissingHeader,
    #[error("Invalid Authorization header")]
    MalformedHeader,
    #[error("Invalid token")]
    InvalidToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConsistencyFailure {
    #[error("Missing X-Cluster-Id header")]
    MissingHeader,
    #[error("Cluster ID mismatch between header and body")]
    Mismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTypeError {
    pub field: &'static str,
    pub expected: &'static str,
    pub found: &'static str,
}

/// Every missing or mistyped required field, in [`crate::REQUIRED_FIELDS`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaViolations {
    pub missing: Vec<&'static str>,
    pub mistyped: Vec<FieldTypeError>,
}

impl fmt::Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.missing.is_empty() {
            write!(f, "Missing required fields: {}", self.missing.join(", "))?;
        }
        if !self.mistyped.is_empty() {
            if !self.missing.is_empty() {
                f.write_str("; ")?;
            }
            f.write_str("Invalid field types: ")?;
            for (idx, err) in self.mistyped.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write!(
                    f,
                    "{} (expected {}, found {})",
                    err.field, err.expected, err.found
                )?;
            }
        }
        Ok(())
    }
}
