use std::sync::Arc;

use anyhow::Context;

use tripsplit_api::app::{build_app, services::AppServices};
use tripsplit_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    tripsplit_observability::init(config.log_format);

    let services = AppServices::from_config(&config).context("failed to open trip store")?;
    if config.password.is_none() {
        tracing::warn!("TRIPSPLIT_PASSWORD not set; the API is open to anyone who can reach it");
    }

    let app = build_app(Arc::new(services), config.password.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
