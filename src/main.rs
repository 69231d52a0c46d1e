use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use polyglot_ocr::{build_app, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("polyglot_ocr=debug,tower_http=debug")),
        )
        .init();

    let (config, loaded_from) = Config::discover()?;
    match &loaded_from {
        Some(path) => info!("Loaded configuration from: {}", path.display()),
        None => info!("No configuration file found; using defaults and environment"),
    }
    config.validate()?;

    let addr = config
        .server
        .socket_addr()
        .map_err(|e| anyhow::anyhow!(e))?;

    let app_state = AppState::new(config)?;
    let app = build_app(app_state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
