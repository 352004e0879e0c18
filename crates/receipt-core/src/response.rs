//! Caller-visible invocation results.

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use crate::pipeline::Outcome;

/// Status code and optional JSON body returned to the invoking host.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: Option<Value>,
}

impl InvocationResponse {
    pub fn ok(body: Option<Value>) -> Self {
        Self { status_code: 200, body }
    }

    /// Failure carrying the error message verbatim.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: Some(json!({ "error": message.into() })),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Host envelope: body is embedded as a JSON string.
    pub fn to_envelope(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<&Outcome> for InvocationResponse {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Ignored(_) => Self::ok(None),
            Outcome::Success(record) => match serde_json::to_value(record) {
                Ok(item) => Self::ok(Some(json!({ "message": "Processed", "item": item }))),
                Err(e) => Self::error(e.to_string()),
            },
            Outcome::Failure(e) => Self::error(e.message()),
        }
    }
}

impl From<Outcome> for InvocationResponse {
    fn from(outcome: Outcome) -> Self {
        Self::from(&outcome)
    }
}

impl Serialize for InvocationResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let len = if self.body.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("statusCode", &self.status_code)?;
        if let Some(body) = &self.body {
            map.serialize_entry("body", &body.to_string())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OcrError, ReceiptError, StoreError};
    use crate::models::expense::{Category, ExpenseRecord};
    use crate::pipeline::IgnoreReason;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_ignored_has_no_body() {
        let response = InvocationResponse::from(Outcome::Ignored(IgnoreReason::DeferredDocument("pdf".into())));
        assert_eq!(response, InvocationResponse { status_code: 200, body: None });
        assert_eq!(response.to_envelope(), json!({ "statusCode": 200 }));
    }

    #[test]
    fn test_success_carries_item() {
        let record = ExpenseRecord::new(
            Category::Food,
            Decimal::from_str("1234.50").unwrap(),
            "Pizza Hut\nTotal: 1,234.50",
            "uploads/x.jpg",
        );
        let response = InvocationResponse::from(Outcome::Success(record.clone()));
        let body = response.body.clone().unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(body["message"], "Processed");
        assert_eq!(body["item"]["id"], record.id.as_str());
        assert_eq!(body["item"]["amount"], "1234.50");
        assert_eq!(body["item"]["category"], "Food");
    }

    #[test]
    fn test_failure_message_is_verbatim() {
        let err = OcrError::Detection("AccessDenied: not authorized".into());
        let response = InvocationResponse::from(Outcome::Failure(err.into()));
        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body,
            Some(json!({ "error": "AccessDenied: not authorized" }))
        );

        let err = StoreError::Write { id: "abc".into(), reason: "throttled".into() };
        let response = InvocationResponse::from(Outcome::Failure(err.into()));
        assert_eq!(
            response.body.unwrap()["error"],
            "throttled"
        );
    }

    #[test]
    fn test_failure_drops_wrapping_context() {
        let err: ReceiptError = OcrError::ObjectRead("objects/receipts/a.png: No such file".into()).into();
        assert_eq!(err.to_string(), "OCR error: object not readable: objects/receipts/a.png: No such file");

        let response = InvocationResponse::from(Outcome::Failure(err));
        assert_eq!(
            response.body.unwrap()["error"],
            "objects/receipts/a.png: No such file"
        );

        let err = ReceiptError::Config("store path is empty".into());
        let response = InvocationResponse::from(Outcome::Failure(err));
        assert_eq!(
            response.body.unwrap()["error"],
            "configuration error: store path is empty"
        );
    }

    #[test]
    fn test_envelope_embeds_body_as_string() {
        let envelope = InvocationResponse::error("boom").to_envelope();
        assert_eq!(envelope["statusCode"], 500);
        let body: Value = serde_json::from_str(envelope["body"].as_str().unwrap()).unwrap();
        assert_eq!(body, json!({ "error": "boom" }));
    }
}
