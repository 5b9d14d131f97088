//! Support-inbox integration for messaging instances.
//!
//! Accepts per-instance integration settings, normalizes them into a record
//! that always satisfies the enabled/disabled invariants, persists it through
//! an [`IntegrationStore`](traits::IntegrationStore) and relays inbound
//! provider webhooks to an [`InboundProcessor`](traits::InboundProcessor).

pub mod controller;
pub mod lenient;
pub mod models;
pub mod normalize;
pub mod processor;
pub mod relay;
pub mod router;
pub mod settings;
pub mod store;
pub mod traits;

#[cfg(test)]
mod tests;

pub use controller::IntegrationController;
pub use models::{
    ConfigRequest, DisabledView, InstanceRef, IntegrationConfig, IntegrationResponse,
    IntegrationView,
};
pub use normalize::normalize;
pub use processor::{AcknowledgingProcessor, HttpProcessor};
pub use relay::WebhookRelay;
pub use router::{AppState, integration_router};
pub use settings::{DEFAULT_PROVIDER_PATH, ServerSettings};
pub use store::{InMemoryIntegrationStore, JsonFileIntegrationStore};
pub use traits::{
    InboundProcessor, IntegrationError, IntegrationResult, IntegrationStore, SharedProcessor,
    SharedStore, ValidationError,
};
