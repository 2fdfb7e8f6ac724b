use serde_json::{Map, Value};

use crate::domain::value::{Token, TokenType};

#[derive(Debug, Clone, PartialEq, Default)]
/// Decoded JSON object returned by an Eskiz endpoint.
///
/// Eskiz response shapes differ per endpoint and change without notice, so the
/// object is kept open. Common top-level keys have helpers.
pub struct ApiResponse(Map<String, Value>);

impl ApiResponse {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Top-level `message` when it is a string.
    pub fn message(&self) -> Option<&str> {
        self.get("message").and_then(Value::as_str)
    }

    /// Top-level `status` when it is a string.
    pub fn status(&self) -> Option<&str> {
        self.get("status").and_then(Value::as_str)
    }

    /// Top-level `data` payload.
    pub fn data(&self) -> Option<&Value> {
        self.get("data")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<ApiResponse> for Value {
    fn from(value: ApiResponse) -> Self {
        Value::Object(value.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Token issued by `auth/login` and `auth/refresh`.
pub struct TokenGrant {
    pub token: Token,
    pub token_type: TokenType,
    pub message: String,
}
