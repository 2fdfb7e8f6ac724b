use reqwest::Method;

use super::{Call, EskizClient, EskizError};
use crate::domain::{ApiResponse, SendSms, Token, TokenGrant, TokenType};

const REFRESH_PATH: &str = "/auth/refresh";
const SEND_SMS_PATH: &str = "/message/sms/send";
const USER_LIMIT_PATH: &str = "/user/get-limit";
const PROFILE_PATH: &str = "/auth/user";

#[derive(Debug, Clone, PartialEq, Eq)]
struct BearerCredential {
    token: Token,
    token_type: TokenType,
}

impl BearerCredential {
    fn header_value(&self) -> String {
        crate::transport::authorization_value(&self.token_type, &self.token)
    }
}

#[derive(Debug, Clone)]
/// Authenticated handle for the Eskiz API.
///
/// Obtained from [`EskizClient::login`] or [`EskizClient::session_from_token`].
/// Token and token type are either both present or both absent; a session
/// without them (from a failed login) only carries diagnostics and every
/// operation on it fails with [`EskizError::NotAuthenticated`].
///
/// [`Session::refresh`] takes `&mut self`, so the token cannot change while
/// another call on the same session is in flight. Share a session between
/// tasks behind your own lock.
pub struct Session {
    client: EskizClient,
    credential: Option<BearerCredential>,
    message: String,
    error: Option<String>,
}

impl Session {
    pub(super) fn authenticated(client: EskizClient, grant: TokenGrant) -> Self {
        Self {
            client,
            credential: Some(BearerCredential {
                token: grant.token,
                token_type: grant.token_type,
            }),
            message: grant.message,
            error: None,
        }
    }

    pub(super) fn failed(client: EskizClient, error: &EskizError) -> Self {
        Self {
            client,
            credential: None,
            message: error.message().to_owned(),
            error: Some(error.to_string()),
        }
    }

    pub(super) fn from_token(client: EskizClient, token: Token, token_type: TokenType) -> Self {
        Self {
            client,
            credential: Some(BearerCredential { token, token_type }),
            message: String::new(),
            error: None,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        self.credential.as_ref().map(|it| &it.token)
    }

    pub fn token_type(&self) -> Option<&TokenType> {
        self.credential.as_ref().map(|it| &it.token_type)
    }

    /// Last human-readable status: the API `message` after login/refresh, or
    /// the failure kind after a failed login.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Full error text of a failed login.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    pub fn client(&self) -> &EskizClient {
        &self.client
    }

    /// Send an SMS.
    ///
    /// Returns the decoded response object (Eskiz replies with the message id
    /// and a `waiting` status).
    pub async fn send(&self, sms: &SendSms) -> Result<ApiResponse, EskizError> {
        let authorization = self.authorization()?;
        let body = crate::transport::encode_send_sms_body(sms);
        let call = Call::with_body("send sms", Method::POST, SEND_SMS_PATH, &body)
            .authorization(authorization);
        self.client
            .call_json(call, crate::transport::decode_api_json_response)
            .await
    }

    /// Get the account SMS limit.
    pub async fn get_user_limit(&self) -> Result<ApiResponse, EskizError> {
        let authorization = self.authorization()?;
        let call = Call::bodiless("get user limit", Method::GET, USER_LIMIT_PATH)
            .authorization(authorization);
        self.client
            .call_json(call, crate::transport::decode_api_json_response)
            .await
    }

    /// Get the account profile.
    pub async fn get_profile(&self) -> Result<ApiResponse, EskizError> {
        let authorization = self.authorization()?;
        let call = Call::bodiless("get me", Method::GET, PROFILE_PATH).authorization(authorization);
        self.client
            .call_json(call, crate::transport::decode_api_json_response)
            .await
    }

    /// Exchange the current token for a fresh one.
    ///
    /// On success the token, token type and message are replaced in place. On
    /// any failure, including a response missing `data.token`, `token_type` or
    /// `message`, the session is left untouched.
    pub async fn refresh(&mut self) -> Result<(), EskizError> {
        let authorization = self.authorization()?;
        let call = Call::bodiless("refresh token", Method::PATCH, REFRESH_PATH)
            .authorization(authorization);
        let grant = self
            .client
            .call_json(call, crate::transport::decode_token_json_response)
            .await?;

        self.credential = Some(BearerCredential {
            token: grant.token,
            token_type: grant.token_type,
        });
        self.message = grant.message;
        self.error = None;
        Ok(())
    }

    fn authorization(&self) -> Result<String, EskizError> {
        self.credential
            .as_ref()
            .map(BearerCredential::header_value)
            .ok_or(EskizError::NotAuthenticated)
    }
}
