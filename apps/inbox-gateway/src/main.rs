mod config;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::serve;
use gsm_inbox_integration::{
    AcknowledgingProcessor, AppState, HttpProcessor, InMemoryIntegrationStore,
    IntegrationController, JsonFileIntegrationStore, SharedProcessor, SharedStore, WebhookRelay,
    integration_router,
};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::GatewayConfig;
use crate::telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::install(&TelemetryConfig::from_env())?;

    let config = GatewayConfig::from_env()?;
    let store = build_store(&config).await?;
    let processor = build_processor(&config);

    let settings = config.server_settings();
    let controller = IntegrationController::new(store, processor.clone(), settings.clone());
    let relay = WebhookRelay::new(processor);
    let router = integration_router(AppState::new(controller, relay));

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("bind {}", config.addr))?;
    info!(
        addr = %config.addr,
        webhook_route = %settings.webhook_route(),
        "inbox-gateway listening"
    );

    serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}

async fn build_store(config: &GatewayConfig) -> Result<SharedStore> {
    match &config.store_path {
        Some(path) => {
            info!(path = %path.display(), "using file-backed integration store");
            Ok(Arc::new(JsonFileIntegrationStore::open(path).await?))
        }
        None => {
            info!("using in-memory integration store");
            Ok(Arc::new(InMemoryIntegrationStore::new()))
        }
    }
}

fn build_processor(config: &GatewayConfig) -> SharedProcessor {
    match &config.processor_url {
        Some(url) => {
            info!(%url, "forwarding inbox events over HTTP");
            Arc::new(HttpProcessor::new(url.clone()))
        }
        None => {
            info!("no processor configured; inbox events are acknowledged only");
            Arc::new(AcknowledgingProcessor)
        }
    }
}
