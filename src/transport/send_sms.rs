use serde::Serialize;

use crate::domain::SendSms;

#[derive(Debug, Serialize)]
pub struct SendSmsJsonRequest<'a> {
    mobile_phone: &'a str,
    message: &'a str,
    from: &'a str,
    callback_url: &'a str,
}

pub fn encode_send_sms_body(request: &SendSms) -> SendSmsJsonRequest<'_> {
    SendSmsJsonRequest {
        mobile_phone: request.mobile_phone().as_str(),
        message: request.message().as_str(),
        from: request.sender().as_str(),
        callback_url: request.callback_url().map_or("", |url| url.as_str()),
    }
}
