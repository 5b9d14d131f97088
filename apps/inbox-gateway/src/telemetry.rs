use std::env;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub json_logs: bool,
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        Self::from_log_format(env::var("LOG_FORMAT").ok().as_deref())
    }

    /// JSON unless `LOG_FORMAT` asks for `text`, `pretty` or `plain`.
    pub fn from_log_format(format: Option<&str>) -> Self {
        let json_logs = format
            .map(|v| !matches!(v.to_lowercase().as_str(), "text" | "pretty" | "plain"))
            .unwrap_or(true);
        Self { json_logs }
    }
}

/// Installs the global subscriber. Filtering follows `RUST_LOG`, default `info`.
pub fn install(cfg: &TelemetryConfig) -> Result<()> {
    let fmt_layer = if cfg.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
