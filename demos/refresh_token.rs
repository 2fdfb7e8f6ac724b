use eskiz::{Credentials, EskizClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "eskiz=info".into()))
        .init();

    let client = EskizClient::new()?;
    let mut session = match client.login(&Credentials::from_env()?).await {
        Ok(session) => session,
        Err(err) => {
            eprintln!(
                "login failed: message={:?} error={:?}",
                err.session().message(),
                err.session().error()
            );
            return Err(err.into());
        }
    };

    session.refresh().await?;
    println!("refreshed: {}", session.message());

    Ok(())
}
