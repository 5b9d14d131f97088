use std::sync::Arc;

use anyhow::Error as AnyError;
use async_trait::async_trait;
use serde_json::Value;

use crate::models::{InstanceRef, IntegrationConfig};

pub type IntegrationResult<T> = Result<T, IntegrationError>;

/// Caller mistakes in a configuration request. Display text is returned to the
/// caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid url")]
    InvalidUrl,

    #[error("account id required")]
    MissingAccountId,

    #[error("token required")]
    MissingToken,

    #[error("sign flag required")]
    MissingSignFlag,

    #[error("instance name required")]
    MissingInstanceName,
}

#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("persistence error: {0:#}")]
    Persistence(#[source] AnyError),

    #[error("processing error: {0:#}")]
    Processing(#[source] AnyError),
}

/// Stores one integration record per instance name.
#[async_trait]
pub trait IntegrationStore: Send + Sync + 'static {
    /// Inserts or replaces the record for `instance` and returns what was stored.
    async fn upsert(
        &self,
        instance: &str,
        config: IntegrationConfig,
    ) -> anyhow::Result<IntegrationConfig>;

    /// Returns `Ok(None)` when nothing has been stored for `instance`.
    async fn load(&self, instance: &str) -> anyhow::Result<Option<IntegrationConfig>>;
}

/// Service side of the integration: provider setup and inbound event handling.
#[async_trait]
pub trait InboundProcessor: Send + Sync + 'static {
    /// Handles one provider event. The payload is passed through untouched and
    /// instances without a stored integration are not filtered out beforehand.
    async fn handle_inbound_event(
        &self,
        instance: &InstanceRef,
        payload: Value,
    ) -> anyhow::Result<Value>;

    /// Provider-side setup for a freshly enabled integration (inbox
    /// registration and similar). Returns the record to persist.
    async fn enable(
        &self,
        instance: &InstanceRef,
        config: IntegrationConfig,
    ) -> anyhow::Result<IntegrationConfig>;
}

pub type SharedStore = Arc<dyn IntegrationStore>;
pub type SharedProcessor = Arc<dyn InboundProcessor>;
