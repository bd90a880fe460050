//! Display text for failed responses.

use serde_json::Value;

/// Read `{ "error": { "message": ... } }` from a non-2xx response body.
///
/// Falls back to `"{prefix}: {status}"` when the body is not JSON, has no
/// `error` object, or carries an empty or non-string message.
#[must_use]
pub fn error_message(status: u16, body: &[u8], prefix: &str) -> String {
    structured_message(body).unwrap_or_else(|| format!("{prefix}: {status}"))
}

fn structured_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let message = value.get("error")?.as_object()?.get("message")?.as_str()?;
    (!message.is_empty()).then(|| message.to_string())
}
