use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, instrument};

use crate::{models::IntegrationConfig, traits::IntegrationStore};

/// Process-local store; concurrent upserts for one instance are last-write-wins.
#[derive(Clone, Default)]
pub struct InMemoryIntegrationStore {
    inner: Arc<RwLock<HashMap<String, IntegrationConfig>>>,
}

impl InMemoryIntegrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl IntegrationStore for InMemoryIntegrationStore {
    async fn upsert(&self, instance: &str, config: IntegrationConfig) -> Result<IntegrationConfig> {
        let mut guard = self.inner.write().await;
        guard.insert(instance.to_string(), config.clone());
        Ok(config)
    }

    async fn load(&self, instance: &str) -> Result<Option<IntegrationConfig>> {
        Ok(self.inner.read().await.get(instance).cloned())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct IntegrationSnapshot {
    #[serde(default)]
    records: BTreeMap<String, IntegrationConfig>,
}

/// Store that rewrites a JSON snapshot file after every upsert. The new
/// snapshot is staged next to the old one and renamed over it.
pub struct JsonFileIntegrationStore {
    path: PathBuf,
    records: Mutex<BTreeMap<String, IntegrationConfig>>,
}

impl JsonFileIntegrationStore {
    /// Loads `path` if it exists, otherwise starts empty.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => {
                let snapshot: IntegrationSnapshot = serde_json::from_str(&raw)
                    .with_context(|| format!("parse integration store {}", path.display()))?;
                snapshot.records
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("read integration store {}", path.display()));
            }
        };
        debug!(path = %path.display(), records = records.len(), "integration store opened");
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the snapshot is staged in before being renamed into place.
    pub fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    // Staged then renamed, so the snapshot on disk is never half-written.
    async fn replace_snapshot(&self, raw: &[u8]) -> Result<()> {
        let staging = self.staging_path();
        tokio::fs::write(&staging, raw)
            .await
            .with_context(|| format!("write integration store {}", staging.display()))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .with_context(|| format!("write integration store {}", self.path.display()))
    }
}

#[async_trait]
impl IntegrationStore for JsonFileIntegrationStore {
    #[instrument(
        name = "integration_store.upsert",
        skip(self, config),
        fields(path = %self.path.display())
    )]
    async fn upsert(&self, instance: &str, config: IntegrationConfig) -> Result<IntegrationConfig> {
        let mut records = self.records.lock().await;
        let previous = records.insert(instance.to_string(), config.clone());
        let snapshot = IntegrationSnapshot {
            records: records.clone(),
        };
        let raw = serde_json::to_vec_pretty(&snapshot).context("encode integration store")?;
        if let Err(err) = self.replace_snapshot(&raw).await {
            match previous {
                Some(previous) => records.insert(instance.to_string(), previous),
                None => records.remove(instance),
            };
            return Err(err);
        }
        Ok(config)
    }

    async fn load(&self, instance: &str) -> Result<Option<IntegrationConfig>> {
        Ok(self.records.lock().await.get(instance).cloned())
    }
}
