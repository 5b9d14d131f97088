use url::Url;

use crate::{
    models::{ConfigRequest, IntegrationConfig},
    traits::ValidationError,
};

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Turns a raw request into the record stored for `instance_name`.
///
/// Disabled requests are never rejected: whatever they carry is replaced by
/// the empty disabled record. Enabled requests must name a reachable provider
/// (`url`, `account_id`, `token`) and state `sign_msg` explicitly.
pub fn normalize(
    instance_name: &str,
    request: &ConfigRequest,
) -> Result<IntegrationConfig, ValidationError> {
    if request.enabled != Some(true) {
        return Ok(IntegrationConfig::disabled(instance_name));
    }

    let url = request.url.as_deref().unwrap_or_default();
    if !is_valid_url(url) {
        return Err(ValidationError::InvalidUrl);
    }
    let account_id =
        non_empty(request.account_id.as_deref()).ok_or(ValidationError::MissingAccountId)?;
    let token = non_empty(request.token.as_deref()).ok_or(ValidationError::MissingToken)?;
    let sign_msg = request.sign_msg.ok_or(ValidationError::MissingSignFlag)?;

    Ok(IntegrationConfig {
        enabled: true,
        url: url.to_string(),
        account_id: account_id.to_string(),
        token: token.to_string(),
        sign_msg,
        sign_delimiter: if sign_msg {
            request.sign_delimiter.clone()
        } else {
            None
        },
        reopen_conversation: request.reopen_conversation.unwrap_or(false),
        conversation_pending: request.conversation_pending.unwrap_or(false),
        auto_create: request.auto_create.unwrap_or(false),
        name_inbox: instance_name.to_string(),
    })
}

/// Accepts `http`, `https` and `ftp` URLs with a host. The scheme may be
/// omitted and no top-level domain is required.
pub fn is_valid_url(raw: &str) -> bool {
    if raw.is_empty() || raw.chars().any(char::is_whitespace) {
        return false;
    }
    let parsed = if raw.contains("://") {
        Url::parse(raw)
    } else {
        Url::parse(&format!("http://{raw}"))
    };
    match parsed {
        Ok(url) => {
            ALLOWED_SCHEMES.contains(&url.scheme())
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
