use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::{
    controller::IntegrationController,
    models::{InstanceRef, IntegrationConfig},
    relay::WebhookRelay,
    router::AppState,
    settings::ServerSettings,
    store::InMemoryIntegrationStore,
    traits::{InboundProcessor, IntegrationStore},
};

pub const BASE_URL: &str = "https://gw.example.com";

pub fn settings() -> ServerSettings {
    ServerSettings::new(BASE_URL, "chatwoot")
}

pub fn instance(name: &str) -> InstanceRef {
    InstanceRef::new(name).unwrap()
}

/// In-memory store that counts calls and can be told to fail.
#[derive(Clone, Default)]
pub struct RecordingStore {
    pub inner: InMemoryIntegrationStore,
    pub upserts: Arc<Mutex<Vec<String>>>,
    pub loads: Arc<Mutex<u32>>,
    pub fail: bool,
}

impl RecordingStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl IntegrationStore for RecordingStore {
    async fn upsert(
        &self,
        instance: &str,
        config: IntegrationConfig,
    ) -> anyhow::Result<IntegrationConfig> {
        self.upserts.lock().await.push(instance.to_string());
        if self.fail {
            return Err(anyhow!("disk full"));
        }
        self.inner.upsert(instance, config).await
    }

    async fn load(&self, instance: &str) -> anyhow::Result<Option<IntegrationConfig>> {
        *self.loads.lock().await += 1;
        if self.fail {
            return Err(anyhow!("connection reset"));
        }
        self.inner.load(instance).await
    }
}

/// Processor that records what it was handed.
#[derive(Clone, Default)]
pub struct RecordingProcessor {
    pub events: Arc<Mutex<Vec<(String, Value)>>>,
    pub enabled: Arc<Mutex<Vec<IntegrationConfig>>>,
    pub fail: bool,
    /// Value written into `name_inbox` and `sign_delimiter` by `enable`.
    pub tamper: Option<String>,
    /// Applied to the record before `enable` returns it.
    pub rewrite: Option<fn(&mut IntegrationConfig)>,
}

impl RecordingProcessor {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl InboundProcessor for RecordingProcessor {
    async fn handle_inbound_event(
        &self,
        instance: &InstanceRef,
        payload: Value,
    ) -> anyhow::Result<Value> {
        if self.fail {
            return Err(anyhow!("provider unreachable"));
        }
        self.events
            .lock()
            .await
            .push((instance.name().to_string(), payload.clone()));
        Ok(json!({ "handled": instance.name(), "echo": payload }))
    }

    async fn enable(
        &self,
        _instance: &InstanceRef,
        mut config: IntegrationConfig,
    ) -> anyhow::Result<IntegrationConfig> {
        if self.fail {
            return Err(anyhow!("inbox registration failed"));
        }
        self.enabled.lock().await.push(config.clone());
        if let Some(value) = &self.tamper {
            config.name_inbox = value.clone();
            config.sign_delimiter = Some(value.clone());
        }
        if let Some(rewrite) = self.rewrite {
            rewrite(&mut config);
        }
        Ok(config)
    }
}

pub fn controller(store: RecordingStore, processor: RecordingProcessor) -> IntegrationController {
    IntegrationController::new(Arc::new(store), Arc::new(processor), settings())
}

pub fn app_state(store: RecordingStore, processor: RecordingProcessor) -> AppState {
    let relay = WebhookRelay::new(Arc::new(processor.clone()));
    AppState::new(controller(store, processor), relay)
}
