use serde_json::{Map, Value};

use crate::error::{FieldTypeError, IngestError, SchemaViolations};
use crate::types::WebhookPayload;

/// Parses a raw request body into a [`WebhookPayload`].
///
/// An empty body is read as `{}`, so it fails with every required field missing.
///
/// ```
/// use awg_core::{validate_payload, IngestError};
///
/// let body = br#"{"event":"sync","appName":"app1","status":"Healthy",
///     "health":{"status":"Healthy"},"revision":"abc123","clusterId":"cluster-a"}"#;
/// let payload = validate_payload(body).unwrap();
/// assert_eq!(payload.cluster_id, "cluster-a");
///
/// let err = validate_payload(b"not json").unwrap_err();
/// assert!(matches!(err, IngestError::MalformedPayload(_)));
/// ```
pub fn validate_payload(body: &[u8]) -> Result<WebhookPayload, IngestError> {
    let raw: &[u8] = if body.is_empty() { b"{}" } else { body };
    let value: Value = serde_json::from_slice(raw).map_err(IngestError::MalformedPayload)?;
    let Value::Object(object) = value else {
        return Err(IngestError::NotAnObject);
    };
    extract(object).map_err(IngestError::SchemaValidation)
}

fn extract(mut object: Map<String, Value>) -> Result<WebhookPayload, SchemaViolations> {
    let mut violations = SchemaViolations::default();

    let event = take_string(&mut object, "event", &mut violations);
    let app_name = take_string(&mut object, "appName", &mut violations);
    let status = take_string(&mut object, "status", &mut violations);
    let health = take_object(&mut object, "health", &mut violations);
    let revision = take_string(&mut object, "revision", &mut violations);
    let cluster_id = take_string(&mut object, "clusterId", &mut violations);

    match (event, app_name, status, health, revision, cluster_id) {
        (
            Some(event),
            Some(app_name),
            Some(status),
            Some(health),
            Some(revision),
            Some(cluster_id),
        ) => Ok(WebhookPayload {
            event,
            app_name,
            status,
            health,
            revision,
            cluster_id,
            extra: object,
        }),
        _ => Err(violations),
    }
}

fn take_string(
    object: &mut Map<String, Value>,
    field: &'static str,
    violations: &mut SchemaViolations,
) -> Option<String> {
    match object.remove(field) {
        Some(Value::String(value)) => Some(value),
        Some(other) => {
            violations.mistyped.push(FieldTypeError {
                field,
                expected: "string",
                found: json_type(&other),
            });
            None
        }
        None => {
            violations.missing.push(field);
            None
        }
    }
}

fn take_object(
    object: &mut Map<String, Value>,
    field: &'static str,
    violations: &mut SchemaViolations,
) -> Option<Map<String, Value>> {
    match object.remove(field) {
        Some(Value::Object(value)) => Some(value),
        Some(other) => {
            violations.mistyped.push(FieldTypeError {
                field,
                expected: "object",
                found: json_type(&other),
            });
            None
        }
        None => {
            violations.missing.push(field);
            None
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "event": "sync",
            "appName": "app1",
            "status": "Healthy",
            "health": { "status": "Healthy" },
            "revision": "abc123",
            "clusterId": "cluster-a"
        })
    }

    fn body(value: &Value) -> Vec<u8> {
        serde_json::to_vec(value).unwrap()
    }

    fn schema_err(body: &[u8]) -> SchemaViolations {
        match validate_payload(body) {
            Err(IngestError::SchemaValidation(v)) => v,
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn accepts_complete_payload() {
        let payload = validate_payload(&body(&valid())).unwrap();
        assert_eq!(payload.event, "sync");
        assert_eq!(payload.app_name, "app1");
        assert_eq!(payload.health["status"], "Healthy");
        assert!(payload.extra.is_empty());
    }

    #[test]
    fn keeps_extra_fields() {
        let mut value = valid();
        value["finishedAt"] = json!("2024-01-01T00:00:00Z");
        let payload = validate_payload(&body(&value)).unwrap();
        assert_eq!(payload.extra["finishedAt"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn rejects_invalid_json() {
        let err = validate_payload(b"{not json").unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON payload");
    }

    #[test]
    fn rejects_non_object_json() {
        let err = validate_payload(b"[1,2,3]").unwrap_err();
        assert!(matches!(err, IngestError::NotAnObject));
    }

    #[test]
    fn empty_body_reports_every_field_missing() {
        let violations = schema_err(b"");
        assert_eq!(violations.missing, crate::REQUIRED_FIELDS.to_vec());
        assert!(violations.mistyped.is_empty());
    }

    #[test]
    fn missing_fields_are_reported_in_fixed_order() {
        let mut value = valid();
        let obj = value.as_object_mut().unwrap();
        obj.remove("clusterId");
        obj.remove("event");
        let violations = schema_err(&body(&value));
        assert_eq!(violations.missing, vec!["event", "clusterId"]);
        assert_eq!(
            violations.to_string(),
            "Missing required fields: event, clusterId"
        );
        // same input, same message
        assert_eq!(schema_err(&body(&value)).to_string(), violations.to_string());
    }

    #[test]
    fn health_must_be_an_object() {
        let mut value = valid();
        value["health"] = json!("Healthy");
        let violations = schema_err(&body(&value));
        assert_eq!(
            violations.mistyped,
            vec![FieldTypeError {
                field: "health",
                expected: "object",
                found: "string",
            }]
        );
    }

    #[test]
    fn null_counts_as_mistyped() {
        let mut value = valid();
        value["revision"] = Value::Null;
        let violations = schema_err(&body(&value));
        assert!(violations.missing.is_empty());
        assert_eq!(violations.mistyped[0].field, "revision");
        assert_eq!(violations.mistyped[0].found, "null");
    }

    #[test]
    fn health_shape_is_not_inspected() {
        let mut value = valid();
        value["health"] = json!({ "nested": { "deep": [1, 2, 3] } });
        assert!(validate_payload(&body(&value)).is_ok());
    }
}
