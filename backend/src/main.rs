use anyhow::Context;
use axum::http::HeaderValue;
use booking_calendar::{config::AppConfig, create_router, initialize_backend};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let app_state = initialize_backend(&config)?;
    let allowed_origin = HeaderValue::from_str(&config.allowed_origin)
        .with_context(|| format!("Invalid allowed origin {:?}", config.allowed_origin))?;
    let app = create_router(app_state, allowed_origin);

    info!("Starting server on {}", config.bind_address);
    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
