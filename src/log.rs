//! Request logging: a sink the client reports every HTTP outcome to.
//!
//! The client is handed one [`RequestLog`] at construction time and calls it
//! once per request. Sinks cannot fail; whatever they do with an entry has no
//! effect on the operation that produced it.

use std::error::Error as StdError;

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutcome {
    Success,
    Failure,
}

#[derive(Debug)]
/// One finished (or failed) request.
pub struct LogEntry<'a> {
    /// Short label of the calling operation, e.g. `send sms`.
    pub operation: &'a str,
    pub outcome: LogOutcome,
    pub url: &'a str,
    /// JSON body as sent, with secrets redacted. `None` for bodiless requests.
    pub request: Option<&'a Value>,
    /// Decoded response JSON, or the raw text as a JSON string. `None` when no
    /// response was received.
    pub response: Option<&'a Value>,
    pub status: Option<u16>,
    pub error: Option<&'a (dyn StdError + 'static)>,
}

/// Capability receiving [`LogEntry`] values.
pub trait RequestLog: Send + Sync {
    fn record(&self, entry: &LogEntry<'_>);
}

#[derive(Debug, Clone, Copy, Default)]
/// Default sink: emits `tracing` events under the `eskiz` target.
///
/// Successes are logged at `INFO`, failures at `WARN`.
pub struct TracingLog;

impl RequestLog for TracingLog {
    fn record(&self, entry: &LogEntry<'_>) {
        let request = entry.request.map(Value::to_string).unwrap_or_default();
        let response = entry.response.map(Value::to_string).unwrap_or_default();
        match entry.outcome {
            LogOutcome::Success => tracing::info!(
                target: "eskiz",
                operation = entry.operation,
                url = entry.url,
                status = entry.status,
                request = %request,
                response = %response,
                "response"
            ),
            LogOutcome::Failure => tracing::warn!(
                target: "eskiz",
                operation = entry.operation,
                url = entry.url,
                status = entry.status,
                request = %request,
                response = %response,
                error = entry.error.map(tracing::field::display),
                "request failed"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Sink that drops every entry.
pub struct NoopLog;

impl RequestLog for NoopLog {
    fn record(&self, _entry: &LogEntry<'_>) {}
}
