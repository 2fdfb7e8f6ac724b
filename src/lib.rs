//! Typed Rust client for the Eskiz.uz SMS gateway HTTP API.
//!
//! The crate is split into a domain layer of validated types, a transport
//! layer for wire-format details, and a small client layer that sends
//! requests and maps the responses. Every request is reported to a
//! [`RequestLog`] sink ([`TracingLog`] by default).
//!
//! ```rust,no_run
//! use eskiz::{Credentials, EskizClient, MessageText, MobilePhone, SendSms, SenderId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EskizClient::new()?;
//!     let session = client
//!         .login(&Credentials::new("me@example.com", "secret")?)
//!         .await?;
//!
//!     let sms = SendSms::new(
//!         MobilePhone::new("998901234567")?,
//!         MessageText::new("hello")?,
//!         SenderId::new("4546")?,
//!     );
//!     let response = session.send(&sms).await?;
//!     println!("{:?}", response.status());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod log;
mod transport;

pub use client::{EskizClient, EskizClientBuilder, EskizError, LoginError, Session};
pub use domain::{
    ApiResponse, CallbackUrl, Credentials, Email, MessageText, MobilePhone, Password, PhoneNumber,
    SendSms, SenderId, Token, TokenGrant, TokenType, ValidationError,
};
pub use log::{LogEntry, LogOutcome, NoopLog, RequestLog, TracingLog};
pub use transport::DecodeError;
