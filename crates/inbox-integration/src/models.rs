use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{lenient, traits::ValidationError};

/// Name of a messaging instance. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InstanceRef {
    name: String,
}

impl InstanceRef {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::MissingInstanceName);
        }
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for InstanceRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Caller-supplied integration settings, before normalization.
///
/// Every field is optional and wrongly typed values read as absent, so that
/// `sign_msg: "yes"` and a missing `sign_msg` are both "unset".
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ConfigRequest {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub account_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub sign_msg: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sign_delimiter: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub reopen_conversation: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub conversation_pending: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub auto_create: Option<bool>,
    /// Accepted for compatibility; always replaced by the instance name.
    #[serde(default, deserialize_with = "lenient::string")]
    pub name_inbox: Option<String>,
}

/// Canonical integration record as persisted for one instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    pub enabled: bool,
    pub url: String,
    pub account_id: String,
    pub token: String,
    pub sign_msg: bool,
    #[serde(default)]
    pub sign_delimiter: Option<String>,
    pub reopen_conversation: bool,
    pub conversation_pending: bool,
    pub auto_create: bool,
    pub name_inbox: String,
}

impl IntegrationConfig {
    /// The record stored for a disabled integration.
    pub fn disabled(name_inbox: impl Into<String>) -> Self {
        Self {
            enabled: false,
            url: String::new(),
            account_id: String::new(),
            token: String::new(),
            sign_msg: false,
            sign_delimiter: None,
            reopen_conversation: false,
            conversation_pending: false,
            auto_create: false,
            name_inbox: name_inbox.into(),
        }
    }
}

impl From<&IntegrationConfig> for ConfigRequest {
    fn from(config: &IntegrationConfig) -> Self {
        Self {
            enabled: Some(config.enabled),
            url: Some(config.url.clone()),
            account_id: Some(config.account_id.clone()),
            token: Some(config.token.clone()),
            sign_msg: Some(config.sign_msg),
            sign_delimiter: config.sign_delimiter.clone(),
            reopen_conversation: Some(config.reopen_conversation),
            conversation_pending: Some(config.conversation_pending),
            auto_create: Some(config.auto_create),
            name_inbox: Some(config.name_inbox.clone()),
        }
    }
}

/// A stored record together with the webhook URL the provider should call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationResponse {
    #[serde(flatten)]
    pub config: IntegrationConfig,
    pub webhook_url: String,
}

/// Reply for an instance with no stored integration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledView {
    pub enabled: bool,
    pub url: String,
    pub account_id: String,
    pub token: String,
    pub sign_msg: bool,
    pub name_inbox: String,
    pub webhook_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IntegrationView {
    Configured(IntegrationResponse),
    Unconfigured(DisabledView),
}
