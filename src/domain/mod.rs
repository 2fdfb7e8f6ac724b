//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{Credentials, EMAIL_ENV, PASSWORD_ENV, SendSms};
pub use response::{ApiResponse, TokenGrant};
pub use validation::ValidationError;
pub use value::{
    CallbackUrl, Email, MessageText, MobilePhone, Password, PhoneNumber, SenderId, Token,
    TokenType,
};
