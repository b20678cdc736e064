use tracing_subscriber::EnvFilter;

use moodmatch::api::{AppConfig, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env()?;
    let addr = config.bind_addr().to_string();
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "MoodMatch server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
