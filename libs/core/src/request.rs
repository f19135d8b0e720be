use bytes::Bytes;
use http::HeaderMap;

/// One inbound webhook call: case-insensitive headers plus the untouched body.
#[derive(Debug, Clone, Default)]
pub struct IncomingRequest {
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl IncomingRequest {
    pub fn new(headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            headers,
            body: body.into(),
        }
    }

    /// Header names present on the request, for logging without exposing values.
    pub fn header_names(&self) -> Vec<&str> {
        self.headers.keys().map(|name| name.as_str()).collect()
    }
}
