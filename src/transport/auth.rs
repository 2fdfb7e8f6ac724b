use serde::{Deserialize, Serialize};

use super::DecodeError;
use crate::domain::{Credentials, Password, Token, TokenGrant, TokenType, ValidationError};

#[derive(Debug, Serialize)]
pub struct LoginJsonRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Fields replaced with `***` before a login body reaches the request log.
pub const LOGIN_REDACTED_FIELDS: &[&str] = &[Password::FIELD];

#[derive(Debug, Clone, Deserialize)]
struct TokenJsonResponse {
    data: TokenJsonData,
    token_type: String,
    message: String,
}

#[derive(Debug, Clone, Deserialize)]
struct TokenJsonData {
    token: String,
}

pub fn encode_login_body(credentials: &Credentials) -> LoginJsonRequest<'_> {
    LoginJsonRequest {
        email: credentials.email().as_str(),
        password: credentials.password().as_str(),
    }
}

/// Decode the body shared by `auth/login` and `auth/refresh`:
/// `{"data":{"token":..},"token_type":..,"message":..}`.
pub fn decode_token_json_response(json: &str) -> Result<TokenGrant, DecodeError> {
    let parsed: TokenJsonResponse = serde_json::from_str(json)?;
    let token = Token::new(parsed.data.token).map_err(empty_field)?;
    let token_type = TokenType::new(parsed.token_type).map_err(empty_field)?;
    Ok(TokenGrant {
        token,
        token_type,
        message: parsed.message,
    })
}

/// `Authorization` header value: `<TitleCase(token_type)> <token>`.
pub fn authorization_value(token_type: &TokenType, token: &Token) -> String {
    format!("{} {}", token_type.title_case(), token.as_str())
}

fn empty_field(err: ValidationError) -> DecodeError {
    match err {
        ValidationError::Empty { field } => DecodeError::EmptyField { field },
        other => DecodeError::Invalid(other),
    }
}
