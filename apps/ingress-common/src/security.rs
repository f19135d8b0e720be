use std::fmt;
use std::sync::Arc;

use awg_core::{AuthFailure, IngestError};
use axum::http::{HeaderMap, header::AUTHORIZATION};
use subtle::ConstantTimeEq;

const BEARER_PREFIX: &str = "Bearer ";

/// Shared-secret check on `Authorization: Bearer <TOKEN>`.
///
/// The token is compared in constant time and never logged.
#[derive(Clone)]
pub struct BearerAuthenticator {
    secret: Arc<str>,
}

impl fmt::Debug for BearerAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuthenticator")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl BearerAuthenticator {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
        }
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<(), IngestError> {
        match self.check(headers) {
            Ok(()) => {
                tracing::debug!("bearer token accepted");
                Ok(())
            }
            Err(failure) => {
                tracing::warn!(reason = %failure, "webhook authentication failed");
                Err(IngestError::Authentication(failure))
            }
        }
    }

    fn check(&self, headers: &HeaderMap) -> Result<(), AuthFailure> {
        let value = headers
            .get(AUTHORIZATION)
            .filter(|value| !value.is_empty())
            .ok_or(AuthFailure::MissingHeader)?;
        let token = value
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .ok_or(AuthFailure::MalformedHeader)?
            .trim();

        if bool::from(token.as_bytes().ct_eq(self.secret.as_bytes())) {
            Ok(())
        } else {
            Err(AuthFailure::InvalidToken)
        }
    }
}
