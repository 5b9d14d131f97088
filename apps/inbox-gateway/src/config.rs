use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use gsm_inbox_integration::{DEFAULT_PROVIDER_PATH, ServerSettings};

const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub addr: SocketAddr,
    pub server_url: String,
    pub provider_path: String,
    pub store_path: Option<PathBuf>,
    pub processor_url: Option<String>,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind = var("BIND").unwrap_or_else(|| DEFAULT_BIND.into());
        let addr: SocketAddr = bind
            .parse()
            .with_context(|| format!("invalid BIND address {bind}"))?;

        Ok(Self {
            addr,
            server_url: var("SERVER_URL")
                .unwrap_or_else(|| DEFAULT_SERVER_URL.into())
                .trim_end_matches('/')
                .to_string(),
            provider_path: var("INBOX_PROVIDER_PATH")
                .unwrap_or_else(|| DEFAULT_PROVIDER_PATH.into()),
            store_path: var("INTEGRATION_STORE_PATH").map(PathBuf::from),
            processor_url: var("INBOX_PROCESSOR_URL"),
        })
    }

    pub fn server_settings(&self) -> ServerSettings {
        ServerSettings::new(&self.server_url, &self.provider_path)
    }
}
