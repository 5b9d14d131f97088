use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{debug, error, info};

use crate::{
    models::{InstanceRef, IntegrationConfig},
    traits::InboundProcessor,
};

/// Hands events and provider setup to a downstream HTTP service.
///
/// Events go to `POST {base}/events/{instance}` and setup to
/// `POST {base}/enable/{instance}`. Requests are sent once; retrying is the
/// downstream's concern.
pub struct HttpProcessor {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProcessor {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, action: &str, instance: &InstanceRef) -> String {
        format!(
            "{}/{action}/{}",
            self.base_url,
            urlencoding::encode(instance.name())
        )
    }

    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%url, %status, "processor endpoint rejected request");
            return Err(anyhow!("HTTP {status} from processor endpoint: {body}"));
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("read reply from {url}"))?;
        serde_json::from_slice(&bytes).with_context(|| format!("decode reply from {url}"))
    }
}

#[async_trait]
impl InboundProcessor for HttpProcessor {
    async fn handle_inbound_event(&self, instance: &InstanceRef, payload: Value) -> Result<Value> {
        let url = self.endpoint("events", instance);
        debug!(%url, "forwarding inbound event");
        self.post_json(&url, &payload).await
    }

    async fn enable(
        &self,
        instance: &InstanceRef,
        config: IntegrationConfig,
    ) -> Result<IntegrationConfig> {
        let url = self.endpoint("enable", instance);
        debug!(%url, "requesting provider setup");
        self.post_json(&url, &config).await
    }
}

/// Stand-in used when no downstream processor is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcknowledgingProcessor;

#[async_trait]
impl InboundProcessor for AcknowledgingProcessor {
    async fn handle_inbound_event(&self, instance: &InstanceRef, payload: Value) -> Result<Value> {
        let event = payload
            .get("event")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        info!(instance = %instance, event, "inbound event acknowledged");
        Ok(json!({ "status": "accepted", "instance": instance.name() }))
    }

    async fn enable(
        &self,
        _instance: &InstanceRef,
        config: IntegrationConfig,
    ) -> Result<IntegrationConfig> {
        Ok(config)
    }
}
