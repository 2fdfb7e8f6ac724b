use crate::domain::validation::ValidationError;
use crate::domain::value::{CallbackUrl, Email, MessageText, MobilePhone, Password, SenderId};

/// Environment variable read by [`Credentials::from_env`] for the account email.
pub const EMAIL_ENV: &str = "ESKIZ_EMAIL";
/// Environment variable read by [`Credentials::from_env`] for the account password.
pub const PASSWORD_ENV: &str = "ESKIZ_PASSWORD";

#[derive(Debug, Clone)]
/// Email/password pair exchanged for a bearer token at login.
pub struct Credentials {
    email: Email,
    password: Password,
}

impl Credentials {
    /// Validate both parts and build the pair.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            password: Password::new(password)?,
        })
    }

    /// Read credentials from `ESKIZ_EMAIL` and `ESKIZ_PASSWORD`.
    ///
    /// A missing variable is reported as an empty field.
    pub fn from_env() -> Result<Self, ValidationError> {
        let email = std::env::var(EMAIL_ENV).unwrap_or_default();
        let password = std::env::var(PASSWORD_ENV).unwrap_or_default();
        Self::new(email, password)
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

#[derive(Debug, Clone)]
/// A single SMS to send through `message/sms/send`.
///
/// The request body always carries `callback_url`; it is `""` when no URL is set.
pub struct SendSms {
    mobile_phone: MobilePhone,
    message: MessageText,
    from: SenderId,
    callback_url: Option<CallbackUrl>,
}

impl SendSms {
    pub fn new(mobile_phone: MobilePhone, message: MessageText, from: SenderId) -> Self {
        Self {
            mobile_phone,
            message,
            from,
            callback_url: None,
        }
    }

    /// Ask Eskiz to POST delivery reports for this message to `url`.
    pub fn with_callback_url(mut self, url: CallbackUrl) -> Self {
        self.callback_url = Some(url);
        self
    }

    pub fn mobile_phone(&self) -> &MobilePhone {
        &self.mobile_phone
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn sender(&self) -> &SenderId {
        &self.from
    }

    pub fn callback_url(&self) -> Option<&CallbackUrl> {
        self.callback_url.as_ref()
    }
}
