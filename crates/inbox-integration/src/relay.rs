use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::{
    models::InstanceRef,
    traits::{IntegrationError, IntegrationResult, SharedProcessor},
};

/// Forwards provider webhooks to the processor without inspecting them.
#[derive(Clone)]
pub struct WebhookRelay {
    processor: SharedProcessor,
}

impl WebhookRelay {
    pub fn new(processor: SharedProcessor) -> Self {
        Self { processor }
    }

    #[instrument(name = "integration.webhook", skip(self, payload), fields(instance = %instance))]
    pub async fn receive(
        &self,
        instance: &InstanceRef,
        payload: Value,
    ) -> IntegrationResult<Value> {
        info!("requested webhook relay");
        self.processor
            .handle_inbound_event(instance, payload)
            .await
            .map_err(|err| {
                warn!(error = %err, "inbound event processing failed");
                IntegrationError::Processing(err)
            })
    }
}
