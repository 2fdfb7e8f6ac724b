use serde_json::{Map, Value};

use super::DecodeError;
use crate::domain::ApiResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
/// HTTP response sorted by the only status codes Eskiz gives meaning to.
pub enum HttpOutcome {
    /// Any status other than 400/401, raw body kept.
    Success(String),
    BadRequest(String),
    Unauthorized(String),
}

/// Classify a response by status code.
///
/// Only 400 and 401 are failures. Redirects and 5xx fall through to
/// [`HttpOutcome::Success`] and surface later as decode errors if the body is
/// not a JSON object.
pub fn classify_response(status: u16, body: String) -> HttpOutcome {
    match status {
        400 => HttpOutcome::BadRequest(body),
        401 => HttpOutcome::Unauthorized(body),
        _ => HttpOutcome::Success(body),
    }
}

/// Decode a response body into an open JSON object.
pub fn decode_api_json_response(json: &str) -> Result<ApiResponse, DecodeError> {
    let parsed: Map<String, Value> = serde_json::from_str(json)?;
    Ok(ApiResponse::new(parsed))
}

/// Best-effort view of a response body for logging: decoded JSON when it
/// parses, the raw text otherwise.
pub fn loggable_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_owned()))
}

/// Replace top-level `fields` of a JSON object with `***`.
pub fn redact(mut value: Value, fields: &[&str]) -> Value {
    if let Value::Object(map) = &mut value {
        for field in fields {
            if let Some(slot) = map.get_mut(*field) {
                *slot = Value::String("***".to_owned());
            }
        }
    }
    value
}
