use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use bluechat_backend::core::config::{AppPaths, ConfigService};
use bluechat_backend::core::logging;
use bluechat_backend::server;
use bluechat_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let paths = Arc::new(AppPaths::new());
    let config_service = ConfigService::new(paths.clone());
    let config = config_service.load_config().with_context(|| {
        format!(
            "Invalid configuration in {}",
            config_service.config_path().display()
        )
    })?;
    logging::init(&paths, &config.logging);

    if let Ok(effective) = serde_json::to_value(&config) {
        tracing::debug!(
            "Effective configuration: {}",
            config_service.redact_sensitive_values(&effective)
        );
    }

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::initialize(&paths, config)?;

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    let addr = listener.local_addr()?;
    tracing::info!("BlueChat server listening on {}", addr);

    let app: Router = server::router::router(state);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
