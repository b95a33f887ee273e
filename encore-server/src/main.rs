use std::path::PathBuf;

use encore_server::{ServerConfig, ServerError, build_catalog, router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
        .map_err(ServerError::Tracing)?;

    let config = ServerConfig::load(std::env::args_os().nth(1).map(PathBuf::from))?;
    let catalog = build_catalog(&config)?;
    let app = router(catalog);

    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.listen.clone(),
            source,
        })?;
    tracing::info!(addr = %config.listen, api_root = %config.catalog.api_root, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown signal received");
            }
        })
        .await
        .map_err(ServerError::Serve)
}
