use product_api_backend::{config::AppConfig, create_router, initialize_backend, io::CorsPolicy};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let app_state = initialize_backend(&config).await;
    let app = create_router(app_state, CorsPolicy::new(config.frontend_url.clone()));

    let listener = TcpListener::bind((config.server_host.as_str(), config.server_port)).await?;
    info!("REST API listening on {}", listener.local_addr()?);
    info!("API docs available at http://{}/docs", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
