//! Compensation engine HTTP server.
//!
//! Reads its configuration directory from `COMPENSATION_CONFIG_DIR`
//! (default `./config/default`) and listens on `COMPENSATION_BIND_ADDR`
//! (default `0.0.0.0:8080`). Log filtering follows `RUST_LOG`.

use std::net::SocketAddr;

use compensation_engine::api::{AppState, create_router};
use compensation_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        std::env::var("COMPENSATION_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr: SocketAddr = std::env::var("COMPENSATION_BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        name = %config.settings().name,
        utc_offset = %config.offset(),
        brackets = config.rate_table().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "compensation-engine listening");
    axum::serve(listener, app).await?;
    Ok(())
}
