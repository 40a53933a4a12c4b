//! # Event Payload
//!
//! The only record that crosses the wire. The client builds one per tracked
//! interaction; the ingestion service validates it and stores the request
//! body verbatim.
//!
//! ## Fields
//!
//! - `event`: semantic event name (required, non-empty)
//! - `data`: arbitrary JSON attached by the caller (optional)
//! - `timestamp`: ISO 8601 time the client built the payload (required, non-empty)
//! - `page`: path of the page that emitted it
//! - `referrer`: document referrer
//! - `userAgent`: client user agent string

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub event: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    pub timestamp: String,

    #[serde(default)]
    pub page: String,

    #[serde(default)]
    pub referrer: String,

    #[serde(default)]
    pub user_agent: String,
}

impl EventPayload {
    /// Create a payload with empty ambient context and no data
    pub fn new(event: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data: None,
            timestamp: timestamp.into(),
            page: String::new(),
            referrer: String::new(),
            user_agent: String::new(),
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach the page path, referrer and user agent
    pub fn with_context(
        mut self,
        page: impl Into<String>,
        referrer: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        self.page = page.into();
        self.referrer = referrer.into();
        self.user_agent = user_agent.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("missing or empty required field: {0}")]
    MissingField(&'static str),
}

/// Validate an incoming payload
///
/// # Validation Rules
///
/// - the payload must be a JSON object
/// - `event`: must be a non-empty string
/// - `timestamp`: must be a non-empty string
///
/// Every other field is optional and unchecked. Nothing is corrected: a
/// payload that fails here is rejected as a whole.
pub fn validate_payload(payload: &Value) -> Result<(), PayloadError> {
    let fields = payload.as_object().ok_or(PayloadError::NotAnObject)?;

    for name in ["event", "timestamp"] {
        let present = fields
            .get(name)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty());

        if !present {
            return Err(PayloadError::MissingField(name));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_payload_valid() {
        let payload = json!({
            "event": "page_view",
            "timestamp": "2026-01-01T00:00:00.000Z",
            "data": {"title": "Home"}
        });

        assert_eq!(validate_payload(&payload), Ok(()));
    }

    #[test]
    fn test_validate_payload_only_required_fields() {
        let payload = json!({"event": "x", "timestamp": "t"});
        assert!(validate_payload(&payload).is_ok());
    }

    #[test]
    fn test_validate_payload_missing_event() {
        let payload = json!({"timestamp": "2026-01-01T00:00:00.000Z"});
        assert_eq!(
            validate_payload(&payload),
            Err(PayloadError::MissingField("event"))
        );
    }

    #[test]
    fn test_validate_payload_missing_timestamp() {
        let payload = json!({"event": "page_view"});
        assert_eq!(
            validate_payload(&payload),
            Err(PayloadError::MissingField("timestamp"))
        );
    }

    #[test]
    fn test_validate_payload_empty_and_null_fields() {
        assert!(validate_payload(&json!({"event": "", "timestamp": "t"})).is_err());
        assert!(validate_payload(&json!({"event": "x", "timestamp": ""})).is_err());
        assert!(validate_payload(&json!({"event": null, "timestamp": "t"})).is_err());
        assert!(validate_payload(&json!({"event": 7, "timestamp": "t"})).is_err());
    }

    #[test]
    fn test_validate_payload_not_an_object() {
        assert_eq!(validate_payload(&json!([1, 2])), Err(PayloadError::NotAnObject));
        assert_eq!(validate_payload(&json!(null)), Err(PayloadError::NotAnObject));
        assert_eq!(validate_payload(&json!("event")), Err(PayloadError::NotAnObject));
    }

    #[test]
    fn test_payload_serializes_user_agent_in_camel_case() {
        let payload = EventPayload::new("page_view", "2026-01-01T00:00:00.000Z")
            .with_context("/pricing", "https://example.com/", "Mozilla/5.0");

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["userAgent"], "Mozilla/5.0");
        assert_eq!(value["page"], "/pricing");
        assert!(value.get("user_agent").is_none());
        assert!(value.get("data").is_none(), "absent data is omitted");
    }

    #[test]
    fn test_payload_deserializes_with_defaults() {
        let payload: EventPayload =
            serde_json::from_value(json!({"event": "e", "timestamp": "t"})).unwrap();

        assert_eq!(payload.event, "e");
        assert!(payload.data.is_none());
        assert!(payload.page.is_empty());
        assert!(payload.user_agent.is_empty());
    }
}
