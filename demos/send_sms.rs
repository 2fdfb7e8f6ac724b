use std::io;

use eskiz::{Credentials, EskizClient, MessageText, MobilePhone, SendSms, SenderId};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "eskiz=info".into()))
        .init();

    let phone_raw = std::env::var("ESKIZ_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "ESKIZ_PHONE environment variable is required",
        )
    })?;
    let message =
        std::env::var("ESKIZ_MESSAGE").unwrap_or_else(|_| "Hello from the eskiz demo.".to_owned());
    let from = std::env::var("ESKIZ_FROM").unwrap_or_else(|_| "4546".to_owned());

    let client = EskizClient::new()?;
    let session = client.login(&Credentials::from_env()?).await?;

    let sms = SendSms::new(
        MobilePhone::new(phone_raw)?,
        MessageText::new(message)?,
        SenderId::new(from)?,
    );
    let response = session.send(&sms).await?;
    println!(
        "status: {:?}, id: {:?}",
        response.status(),
        response.get("id")
    );

    Ok(())
}
