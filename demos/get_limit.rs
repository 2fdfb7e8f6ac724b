use eskiz::{Credentials, EskizClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "eskiz=info".into()))
        .init();

    let client = EskizClient::new()?;
    let session = client.login(&Credentials::from_env()?).await?;

    let limit = session.get_user_limit().await?;
    println!("limit: {:?}", limit.data());

    let profile = session.get_profile().await?;
    println!("profile: {:?}", profile.data());

    Ok(())
}
