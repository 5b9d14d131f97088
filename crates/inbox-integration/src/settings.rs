/// Path segment the provider endpoints are mounted under.
pub const DEFAULT_PROVIDER_PATH: &str = "chatwoot";

/// Process-wide server settings, resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerSettings {
    base_url: String,
    provider_path: String,
}

impl ServerSettings {
    pub fn new(base_url: impl Into<String>, provider_path: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let provider_path = provider_path.into().trim_matches('/').to_string();
        Self {
            base_url,
            provider_path,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn provider_path(&self) -> &str {
        &self.provider_path
    }

    /// Route the webhook receiver is mounted at, with `{instance}` as capture.
    pub fn webhook_route(&self) -> String {
        format!("/{}/webhook/{{instance}}", self.provider_path)
    }

    /// Externally reachable webhook URL for `instance`.
    /// Example: "https://gw.example.com/chatwoot/webhook/shop%201"
    pub fn webhook_url(&self, instance: &str) -> String {
        format!(
            "{}/{}/webhook/{}",
            self.base_url,
            self.provider_path,
            urlencoding::encode(instance)
        )
    }
}
