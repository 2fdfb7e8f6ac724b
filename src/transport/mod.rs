//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod auth;
mod response;
mod send_sms;

pub use auth::{
    LOGIN_REDACTED_FIELDS, authorization_value, decode_token_json_response, encode_login_body,
};
pub use response::{
    HttpOutcome, classify_response, decode_api_json_response, loggable_body, redact,
};
pub use send_sms::encode_send_sms_body;

use crate::domain::ValidationError;

#[derive(Debug, thiserror::Error)]
/// Response body could not be turned into the expected shape.
pub enum DecodeError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response field {field} is empty")]
    EmptyField { field: &'static str },

    #[error("response field is invalid: {0}")]
    Invalid(ValidationError),
}
