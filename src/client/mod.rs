//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod session;

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

pub use session::Session;

use crate::domain::{Credentials, Token, TokenType, ValidationError};
use crate::log::{LogEntry, LogOutcome, RequestLog, TracingLog};
use crate::transport::{DecodeError, HttpOutcome};

pub const DEFAULT_BASE_URL: &str = "https://notify.eskiz.uz/api";
/// Client-level timeout covering connect, send and body read.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
/// Upper bound on a single request. The smaller of this and the client timeout wins.
pub const DEFAULT_REQUEST_DEADLINE: Duration = Duration::from_secs(60);

const LOGIN_PATH: &str = "/auth/login";
const JSON_CONTENT_TYPE: &str = "application/json";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpRequest {
    method: Method,
    url: String,
    authorization: Option<String>,
    content_type: Option<&'static str>,
    body: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
    deadline: Duration,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(request.method, &request.url)
                .timeout(self.deadline);
            if let Some(value) = request.authorization {
                builder = builder.header(AUTHORIZATION, value);
            }
            if let Some(value) = request.content_type {
                builder = builder.header(CONTENT_TYPE, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`EskizClient`] and [`Session`].
///
/// Every failure is final for the call that produced it; nothing is retried.
pub enum EskizError {
    /// Request body could not be encoded as JSON.
    #[error("marshaling body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// HTTP client / transport failure (DNS, TLS, connect, timeouts, etc).
    #[error("doing request: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Eskiz answered `400 Bad Request`.
    #[error("bad request")]
    BadRequest { body: String },

    /// Eskiz answered `401 Unauthorized`; the token is missing, wrong or expired.
    #[error("unauthorized")]
    Unauthorized { body: String },

    /// Response body is not the expected JSON.
    #[error("decoding response: {0}")]
    Decode(#[from] DecodeError),

    /// The underlying HTTP client rejected the configuration (e.g. user-agent).
    #[error("building HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The session holds no token (login failed).
    #[error("not authenticated")]
    NotAuthenticated,

    /// Client configuration was rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl EskizError {
    /// Short description of the failure kind, without source details.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Serialize(_) => "marshaling body",
            Self::Transport(_) => "doing request",
            Self::BadRequest { .. } => "bad request",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Decode(_) => "decoding response",
            Self::ClientBuild(_) => "building HTTP client",
            Self::NotAuthenticated => "not authenticated",
            Self::Validation(_) => "validation error",
        }
    }

    /// HTTP status for server-reported failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    /// Raw response text preserved with server-reported failures.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::BadRequest { body } | Self::Unauthorized { body } => Some(body),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("login failed: {source}")]
/// Failed [`EskizClient::login`].
///
/// Carries an unauthenticated [`Session`] whose `message`/`error` describe the
/// failure, next to the error itself.
pub struct LoginError {
    session: Box<Session>,
    #[source]
    source: EskizError,
}

impl LoginError {
    /// The non-usable session describing the failure.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn error(&self) -> &EskizError {
        &self.source
    }

    pub fn into_parts(self) -> (Session, EskizError) {
        (*self.session, self.source)
    }
}

#[derive(Clone)]
/// Builder for [`EskizClient`].
///
/// Use this when you need to customize the base URL, timeouts, user-agent, or logger.
pub struct EskizClientBuilder {
    base_url: String,
    timeout: Duration,
    request_deadline: Duration,
    user_agent: Option<String>,
    log: Arc<dyn RequestLog>,
}

impl EskizClientBuilder {
    /// Create a builder with the production base URL and default timeouts.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            request_deadline: DEFAULT_REQUEST_DEADLINE,
            user_agent: None,
            log: Arc::new(TracingLog),
        }
    }

    /// Override the API base URL (everything before `/auth/login`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the client-level timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the per-request deadline.
    pub fn request_deadline(mut self, deadline: Duration) -> Self {
        self.request_deadline = deadline;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Replace the default [`TracingLog`] sink.
    pub fn logger(mut self, log: Arc<dyn RequestLog>) -> Self {
        self.log = log;
        self
    }

    /// Build an [`EskizClient`].
    pub fn build(self) -> Result<EskizClient, EskizError> {
        let base_url = normalize_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(EskizError::ClientBuild)?;

        Ok(EskizClient {
            base_url,
            http: Arc::new(ReqwestTransport {
                client,
                deadline: self.request_deadline.min(self.timeout),
            }),
            log: self.log,
        })
    }
}

impl Default for EskizClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_base_url(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim().trim_end_matches('/');
    let invalid = || ValidationError::InvalidUrl {
        field: "base_url",
        input: value.to_owned(),
    };
    let parsed = url::Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid());
    }
    Ok(trimmed.to_owned())
}

/// Successful round trip: raw response text plus the logged request body.
#[derive(Debug)]
struct Exchange {
    status: u16,
    body: String,
    request: Option<Value>,
}

/// One request as seen by the envelope.
struct Call<'a, B: ?Sized> {
    operation: &'static str,
    method: Method,
    path: &'static str,
    body: Option<&'a B>,
    authorization: Option<String>,
    redact: &'static [&'static str],
}

impl Call<'static, ()> {
    fn bodiless(operation: &'static str, method: Method, path: &'static str) -> Self {
        Self {
            operation,
            method,
            path,
            body: None,
            authorization: None,
            redact: &[],
        }
    }
}

impl<'a, B: ?Sized> Call<'a, B> {
    fn with_body(operation: &'static str, method: Method, path: &'static str, body: &'a B) -> Self {
        Self {
            operation,
            method,
            path,
            body: Some(body),
            authorization: None,
            redact: &[],
        }
    }

    fn authorization(mut self, value: String) -> Self {
        self.authorization = Some(value);
        self
    }

    fn redact(mut self, fields: &'static [&'static str]) -> Self {
        self.redact = fields;
        self
    }
}

#[derive(Clone)]
/// High-level Eskiz client.
///
/// Holds the HTTP transport, the base URL and the request logger. Log in with
/// [`EskizClient::login`] to obtain a [`Session`] for authenticated calls.
/// Cloning is cheap; clones share the connection pool.
pub struct EskizClient {
    base_url: String,
    http: Arc<dyn HttpTransport>,
    log: Arc<dyn RequestLog>,
}

impl fmt::Debug for EskizClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EskizClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl EskizClient {
    /// Create a client with the production base URL, default timeouts and [`TracingLog`].
    ///
    /// For more customization, use [`EskizClient::builder`].
    pub fn new() -> Result<Self, EskizError> {
        EskizClientBuilder::new().build()
    }

    /// Start building a client with custom settings.
    pub fn builder() -> EskizClientBuilder {
        EskizClientBuilder::new()
    }

    /// Base URL every endpoint path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange email/password for a bearer token.
    ///
    /// Errors:
    /// - [`EskizError::Serialize`] / [`EskizError::Transport`] when the request could not be made,
    /// - [`EskizError::BadRequest`] / [`EskizError::Unauthorized`] for 400/401 responses,
    /// - [`EskizError::Decode`] when `data.token`, `token_type` or `message` is missing,
    ///   mis-typed or empty.
    ///
    /// On failure the returned [`LoginError`] still carries a [`Session`] with no
    /// token and the failure recorded in its `message`/`error`.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, LoginError> {
        let body = crate::transport::encode_login_body(credentials);
        let call = Call::with_body("authorization", Method::POST, LOGIN_PATH, &body)
            .redact(crate::transport::LOGIN_REDACTED_FIELDS);

        match self
            .call_json(call, crate::transport::decode_token_json_response)
            .await
        {
            Ok(grant) => Ok(Session::authenticated(self.clone(), grant)),
            Err(source) => Err(LoginError {
                session: Box::new(Session::failed(self.clone(), &source)),
                source,
            }),
        }
    }

    /// Restore a session from a token obtained earlier, without a network call.
    pub fn session_from_token(&self, token: Token, token_type: TokenType) -> Session {
        Session::from_token(self.clone(), token, token_type)
    }

    /// Run one request through the envelope and decode its body.
    async fn call_json<T, B>(
        &self,
        call: Call<'_, B>,
        decode: fn(&str) -> Result<T, DecodeError>,
    ) -> Result<T, EskizError>
    where
        B: Serialize + ?Sized,
    {
        let operation = call.operation;
        let url = self.url(call.path);
        let exchange = self.execute(call).await?;

        decode(&exchange.body).map_err(|err| {
            let err = EskizError::Decode(err);
            let response = crate::transport::loggable_body(&exchange.body);
            self.record(
                operation,
                &url,
                exchange.request.as_ref(),
                Some(&response),
                Some(exchange.status),
                Some(&err),
            );
            err
        })
    }

    /// Send one request and classify the response.
    ///
    /// Only 400 and 401 are errors; every other status returns the raw body.
    async fn execute<B>(&self, call: Call<'_, B>) -> Result<Exchange, EskizError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(call.path);

        let (body, logged_request) = match call.body {
            Some(body) => match serde_json::to_vec(body) {
                Ok(bytes) => {
                    let logged = serde_json::from_slice::<Value>(&bytes)
                        .ok()
                        .map(|value| crate::transport::redact(value, call.redact));
                    (Some(bytes), logged)
                }
                Err(err) => {
                    let err = EskizError::Serialize(err);
                    self.record(call.operation, &url, None, None, None, Some(&err));
                    return Err(err);
                }
            },
            None => (None, None),
        };

        let request = HttpRequest {
            method: call.method,
            url: url.clone(),
            authorization: call.authorization,
            content_type: body.as_ref().map(|_| JSON_CONTENT_TYPE),
            body,
        };

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                let err = EskizError::Transport(err);
                self.record(
                    call.operation,
                    &url,
                    logged_request.as_ref(),
                    None,
                    None,
                    Some(&err),
                );
                return Err(err);
            }
        };

        let status = response.status;
        let logged_response = crate::transport::loggable_body(&response.body);
        let result = match crate::transport::classify_response(status, response.body) {
            HttpOutcome::Success(body) => Ok(Exchange {
                status,
                body,
                request: logged_request.clone(),
            }),
            HttpOutcome::BadRequest(body) => Err(EskizError::BadRequest { body }),
            HttpOutcome::Unauthorized(body) => Err(EskizError::Unauthorized { body }),
        };

        self.record(
            call.operation,
            &url,
            logged_request.as_ref(),
            Some(&logged_response),
            Some(status),
            result.as_ref().err(),
        );
        result
    }

    fn record(
        &self,
        operation: &str,
        url: &str,
        request: Option<&Value>,
        response: Option<&Value>,
        status: Option<u16>,
        error: Option<&EskizError>,
    ) {
        let outcome = if error.is_some() {
            LogOutcome::Failure
        } else {
            LogOutcome::Success
        };
        self.log.record(&LogEntry {
            operation,
            outcome,
            url,
            request,
            response,
            status,
            error: error.map(|err| err as &(dyn StdError + 'static)),
        });
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    #[derive(Debug, Clone)]
    pub(crate) struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug, Default)]
    struct FakeTransportState {
        requests: Vec<HttpRequest>,
        responses: VecDeque<Result<HttpResponse, String>>,
    }

    impl FakeTransport {
        pub(crate) fn new(status: u16, body: impl Into<String>) -> Self {
            let transport = Self {
                state: Arc::new(Mutex::new(FakeTransportState::default())),
            };
            transport.then(status, body)
        }

        pub(crate) fn failing(message: impl Into<String>) -> Self {
            let transport = Self {
                state: Arc::new(Mutex::new(FakeTransportState::default())),
            };
            transport
                .state
                .lock()
                .unwrap()
                .responses
                .push_back(Err(message.into()));
            transport
        }

        /// Queue another response; the last one is repeated once the queue drains.
        pub(crate) fn then(self, status: u16, body: impl Into<String>) -> Self {
            self.state
                .lock()
                .unwrap()
                .responses
                .push_back(Ok(HttpResponse {
                    status,
                    body: body.into(),
                }));
            self
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.state.lock().unwrap().requests.clone()
        }

        pub(crate) fn last_request(&self) -> HttpRequest {
            self.requests().pop().expect("no request was sent")
        }
    }

    impl HttpTransport for FakeTransport {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let mut state = self.state.lock().unwrap();
                state.requests.push(request);
                let next = if state.responses.len() > 1 {
                    state.responses.pop_front()
                } else {
                    state.responses.front().cloned()
                };
                match next.expect("no response queued") {
                    Ok(response) => Ok(response),
                    Err(message) => Err(message.into()),
                }
            })
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct RecordedEntry {
        pub(crate) operation: String,
        pub(crate) outcome: LogOutcome,
        pub(crate) url: String,
        pub(crate) request: Option<Value>,
        pub(crate) response: Option<Value>,
        pub(crate) status: Option<u16>,
        pub(crate) error: Option<String>,
    }

    #[derive(Debug, Default)]
    pub(crate) struct RecordingLog {
        entries: Mutex<Vec<RecordedEntry>>,
    }

    impl RecordingLog {
        pub(crate) fn entries(&self) -> Vec<RecordedEntry> {
            self.entries.lock().unwrap().clone()
        }
    }

    impl RequestLog for RecordingLog {
        fn record(&self, entry: &LogEntry<'_>) {
            self.entries.lock().unwrap().push(RecordedEntry {
                operation: entry.operation.to_owned(),
                outcome: entry.outcome,
                url: entry.url.to_owned(),
                request: entry.request.cloned(),
                response: entry.response.cloned(),
                status: entry.status,
                error: entry.error.map(ToString::to_string),
            });
        }
    }

    pub(crate) fn make_client(transport: FakeTransport, log: Arc<RecordingLog>) -> EskizClient {
        EskizClient {
            base_url: "https://example.invalid/api".to_owned(),
            http: Arc::new(transport),
            log,
        }
    }

    pub(crate) const LOGIN_OK: &str =
        r#"{"data":{"token":"T1"},"token_type":"bearer","message":"ok"}"#;

    fn creds() -> Credentials {
        Credentials::new("a@b.com", "p").unwrap()
    }

    #[tokio::test]
    async fn login_posts_credentials_and_builds_session() {
        let transport = FakeTransport::new(200, LOGIN_OK);
        let client = make_client(transport.clone(), Arc::default());

        let session = client.login(&creds()).await.unwrap();
        assert_eq!(session.token().map(Token::as_str), Some("T1"));
        assert_eq!(session.token_type().map(TokenType::as_str), Some("bearer"));
        assert_eq!(session.message(), "ok");
        assert_eq!(session.error(), None);

        let request = transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, "https://example.invalid/api/auth/login");
        assert_eq!(request.authorization, None);
        assert_eq!(request.content_type, Some("application/json"));
        let body: Value = serde_json::from_slice(&request.body.unwrap()).unwrap();
        assert_eq!(body, json!({"email": "a@b.com", "password": "p"}));
    }

    #[tokio::test]
    async fn login_unauthorized_returns_failed_session() {
        let transport = FakeTransport::new(401, r#"{"message":"Invalid credentials"}"#);
        let client = make_client(transport, Arc::default());

        let err = client.login(&creds()).await.unwrap_err();
        assert!(matches!(err.error(), EskizError::Unauthorized { .. }));
        assert_eq!(err.error().status(), Some(401));

        let (session, source) = err.into_parts();
        assert!(session.token().is_none());
        assert!(session.token_type().is_none());
        assert!(!session.is_authenticated());
        assert_eq!(session.message(), "unauthorized");
        assert_eq!(session.error(), Some("unauthorized"));
        assert_eq!(
            source.body(),
            Some(r#"{"message":"Invalid credentials"}"#)
        );
    }

    #[tokio::test]
    async fn login_transport_failure_records_message_and_error() {
        let transport = FakeTransport::failing("connection refused");
        let client = make_client(transport, Arc::default());

        let err = client.login(&creds()).await.unwrap_err();
        assert!(matches!(err.error(), EskizError::Transport(_)));
        assert_eq!(err.session().message(), "doing request");
        assert_eq!(
            err.session().error(),
            Some("doing request: connection refused")
        );
        assert!(err.session().token().is_none());
    }

    #[tokio::test]
    async fn login_missing_token_fields_is_decode_error() {
        let transport = FakeTransport::new(200, r#"{"message":"ok","token_type":"bearer"}"#);
        let client = make_client(transport, Arc::default());

        let err = client.login(&creds()).await.unwrap_err();
        assert!(matches!(err.error(), EskizError::Decode(DecodeError::Json(_))));
        assert!(err.session().token().is_none());
        assert_eq!(err.session().message(), "decoding response");
    }

    #[tokio::test]
    async fn login_invalid_json_is_decode_error() {
        let transport = FakeTransport::new(200, "{ not json }");
        let client = make_client(transport, Arc::default());

        let err = client.login(&creds()).await.unwrap_err();
        assert!(matches!(err.error(), EskizError::Decode(_)));
        assert!(err.to_string().starts_with("login failed: decoding response"));
    }

    #[tokio::test]
    async fn decode_failure_entry_keeps_request_and_status() {
        let log = Arc::new(RecordingLog::default());
        let client = make_client(FakeTransport::new(502, "<html>"), log.clone());

        client.login(&creds()).await.unwrap_err();

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].outcome, LogOutcome::Success);
        let failure = &entries[1];
        assert_eq!(failure.operation, "authorization");
        assert_eq!(failure.outcome, LogOutcome::Failure);
        assert_eq!(failure.status, Some(502));
        assert_eq!(
            failure.request,
            Some(json!({"email": "a@b.com", "password": "***"}))
        );
        assert_eq!(failure.response, Some(json!("<html>")));
        assert!(
            failure
                .error
                .as_deref()
                .is_some_and(|it| it.starts_with("decoding response"))
        );
    }

    #[tokio::test]
    async fn login_log_entry_redacts_password() {
        let log = Arc::new(RecordingLog::default());
        let client = make_client(FakeTransport::new(200, LOGIN_OK), log.clone());

        client.login(&creds()).await.unwrap();

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.operation, "authorization");
        assert_eq!(entry.outcome, LogOutcome::Success);
        assert_eq!(entry.url, "https://example.invalid/api/auth/login");
        assert_eq!(entry.status, Some(200));
        assert_eq!(
            entry.request,
            Some(json!({"email": "a@b.com", "password": "***"}))
        );
        assert_eq!(entry.response.as_ref().unwrap()["data"]["token"], "T1");
    }

    #[tokio::test]
    async fn execute_logs_raw_text_for_non_json_failures() {
        let log = Arc::new(RecordingLog::default());
        let client = make_client(FakeTransport::new(400, "nope"), log.clone());

        let err = client
            .execute(Call::bodiless("get me", Method::GET, "/auth/user"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "bad request");
        assert_eq!(err.body(), Some("nope"));

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].outcome, LogOutcome::Failure);
        assert_eq!(entries[0].status, Some(400));
        assert_eq!(entries[0].request, None);
        assert_eq!(entries[0].response, Some(json!("nope")));
        assert_eq!(entries[0].error.as_deref(), Some("bad request"));
    }

    #[tokio::test]
    async fn execute_treats_server_errors_as_success() {
        let client = make_client(FakeTransport::new(500, "oops"), Arc::default());

        let exchange = client
            .execute(Call::bodiless("get me", Method::GET, "/auth/user"))
            .await
            .unwrap();
        assert_eq!(exchange.status, 500);
        assert_eq!(exchange.body, "oops");
    }

    #[tokio::test]
    async fn execute_without_body_sets_no_content_type() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client(transport.clone(), Arc::default());

        client
            .execute(Call::bodiless("get me", Method::GET, "/auth/user"))
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.content_type, None);
        assert!(request.body.is_none());
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    #[tokio::test]
    async fn execute_reports_serialization_failure_without_sending() {
        let transport = FakeTransport::new(200, "{}");
        let log = Arc::new(RecordingLog::default());
        let client = make_client(transport.clone(), log.clone());

        let err = client
            .execute(Call::with_body(
                "send sms",
                Method::POST,
                "/message/sms/send",
                &Unserializable,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, EskizError::Serialize(_)));
        assert_eq!(err.message(), "marshaling body");
        assert_eq!(err.status(), None);
        assert!(transport.requests().is_empty());
        assert_eq!(log.entries()[0].outcome, LogOutcome::Failure);
    }

    #[test]
    fn builder_normalizes_base_url() {
        let client = EskizClient::builder()
            .base_url("https://example.invalid/api/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://example.invalid/api");

        let client = EskizClient::new().unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn builder_rejects_invalid_base_url() {
        for input in ["", "not a url", "ftp://example.invalid"] {
            let err = EskizClient::builder().base_url(input).build().unwrap_err();
            assert!(
                matches!(
                    err,
                    EskizError::Validation(ValidationError::InvalidUrl {
                        field: "base_url",
                        ..
                    })
                ),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn builder_reports_http_client_rejection() {
        let err = EskizClient::builder()
            .user_agent("bad\nagent")
            .build()
            .unwrap_err();
        assert!(matches!(err, EskizError::ClientBuild(_)));
        assert_eq!(err.message(), "building HTTP client");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn error_helpers_expose_kind_status_and_body() {
        let err = EskizError::Unauthorized {
            body: "x".to_owned(),
        };
        assert_eq!(err.message(), "unauthorized");
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.body(), Some("x"));

        let err = EskizError::NotAuthenticated;
        assert_eq!(err.status(), None);
        assert_eq!(err.body(), None);
    }
}
