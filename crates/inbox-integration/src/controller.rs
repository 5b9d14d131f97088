use anyhow::anyhow;
use tracing::{debug, info, instrument, warn};

use crate::{
    models::{
        ConfigRequest, DisabledView, InstanceRef, IntegrationConfig, IntegrationResponse,
        IntegrationView,
    },
    normalize::normalize,
    settings::ServerSettings,
    traits::{IntegrationError, IntegrationResult, SharedProcessor, SharedStore},
};

/// Accepts integration settings for an instance and reads them back.
#[derive(Clone)]
pub struct IntegrationController {
    store: SharedStore,
    processor: SharedProcessor,
    settings: ServerSettings,
}

impl IntegrationController {
    pub fn new(store: SharedStore, processor: SharedProcessor, settings: ServerSettings) -> Self {
        Self {
            store,
            processor,
            settings,
        }
    }

    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    /// Normalizes `request`, runs provider setup when enabled and upserts the
    /// result. The record returned by setup is normalized again, so it cannot
    /// break the enabled/disabled invariants. Nothing is written when
    /// validation or setup fails.
    #[instrument(name = "integration.create", skip(self, request), fields(instance = %instance))]
    pub async fn create(
        &self,
        instance: &InstanceRef,
        request: &ConfigRequest,
    ) -> IntegrationResult<IntegrationResponse> {
        info!("requested integration create");

        let config = normalize(instance.name(), request)?;
        let config = if config.enabled {
            let enabled = self
                .processor
                .enable(instance, config)
                .await
                .map_err(|err| {
                    warn!(error = %err, "provider setup failed");
                    IntegrationError::Processing(err)
                })?;
            normalize(instance.name(), &ConfigRequest::from(&enabled)).map_err(|err| {
                warn!(error = %err, "provider setup returned an invalid record");
                IntegrationError::Processing(anyhow!(
                    "provider setup returned an invalid record: {err}"
                ))
            })?
        } else {
            debug!("integration disabled; stored record reset");
            config
        };

        let stored = self
            .store
            .upsert(instance.name(), config)
            .await
            .map_err(|err| {
                warn!(error = %err, "integration upsert failed");
                IntegrationError::Persistence(err)
            })?;

        Ok(self.respond(instance, stored))
    }

    /// Returns the stored record, or the empty disabled view when none exists.
    #[instrument(name = "integration.find", skip(self), fields(instance = %instance))]
    pub async fn find(&self, instance: &InstanceRef) -> IntegrationResult<IntegrationView> {
        info!("requested integration find");

        let stored = self.store.load(instance.name()).await.map_err(|err| {
            warn!(error = %err, "integration load failed");
            IntegrationError::Persistence(err)
        })?;

        Ok(match stored {
            Some(config) => IntegrationView::Configured(self.respond(instance, config)),
            None => IntegrationView::Unconfigured(DisabledView::default()),
        })
    }

    fn respond(&self, instance: &InstanceRef, config: IntegrationConfig) -> IntegrationResponse {
        IntegrationResponse {
            config,
            webhook_url: self.settings.webhook_url(instance.name()),
        }
    }
}
