//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives the raw request body and/or the `movement_id` path parameter
//! 2. Calls the injected store
//! 3. Returns a JSON response with the status code of the contract

use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Location ping endpoints
pub mod locations;
/// Financial movement endpoints
pub mod movements;

/// CORS preflight: 200 with an empty body.
///
/// The CORS middleware adds the headers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Decode a raw request body.
///
/// Bodies are taken as bytes rather than through the `Json` extractor so a
/// missing `Content-Type` is never a rejection. An empty (or blank) body
/// decodes to `Value::Null`.
pub(crate) fn decode_body(bytes: &[u8]) -> Result<Value, serde_json::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(bytes)
}

/// Read a JSON object into `T`, treating `null` as `{}`.
///
/// Arrays and scalars are rejected instead of being matched to struct
/// fields by position.
pub(crate) fn from_object<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    match value {
        Value::Null => serde_json::from_value(Value::Object(Default::default())),
        Value::Object(_) => serde_json::from_value(value),
        other => Err(serde::de::Error::custom(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}
