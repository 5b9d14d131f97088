use crate::{
    models::{ConfigRequest, IntegrationConfig},
    normalize::{is_valid_url, normalize},
    traits::ValidationError,
};

fn enabled_request() -> ConfigRequest {
    ConfigRequest {
        enabled: Some(true),
        url: Some("https://cw.example.com".into()),
        account_id: Some("42".into()),
        token: Some("abc".into()),
        sign_msg: Some(true),
        sign_delimiter: Some("\u{2014}".into()),
        ..ConfigRequest::default()
    }
}

#[test]
fn enabled_request_keeps_fields() {
    let config = normalize("shop1", &enabled_request()).unwrap();
    assert!(config.enabled);
    assert_eq!(config.url, "https://cw.example.com");
    assert_eq!(config.account_id, "42");
    assert_eq!(config.token, "abc");
    assert!(config.sign_msg);
    assert_eq!(config.sign_delimiter.as_deref(), Some("\u{2014}"));
    assert_eq!(config.name_inbox, "shop1");
    assert!(!config.reopen_conversation);
    assert!(!config.conversation_pending);
    assert!(!config.auto_create);
}

#[test]
fn enabled_request_carries_conversation_flags() {
    let request = ConfigRequest {
        reopen_conversation: Some(true),
        conversation_pending: Some(true),
        auto_create: Some(true),
        ..enabled_request()
    };
    let config = normalize("shop1", &request).unwrap();
    assert!(config.reopen_conversation);
    assert!(config.conversation_pending);
    assert!(config.auto_create);
}

#[test]
fn disabled_request_discards_everything() {
    let request = ConfigRequest {
        enabled: Some(false),
        url: Some("not a url".into()),
        token: Some(String::new()),
        sign_msg: Some(true),
        sign_delimiter: Some("--".into()),
        reopen_conversation: Some(true),
        conversation_pending: Some(true),
        auto_create: Some(true),
        name_inbox: Some("other".into()),
        ..ConfigRequest::default()
    };
    let config = normalize("shop1", &request).unwrap();
    assert_eq!(config, IntegrationConfig::disabled("shop1"));
}

#[test]
fn absent_enabled_flag_is_disabled() {
    let request = ConfigRequest {
        url: Some("https://cw.example.com".into()),
        account_id: Some("42".into()),
        ..ConfigRequest::default()
    };
    assert_eq!(
        normalize("shop1", &request).unwrap(),
        IntegrationConfig::disabled("shop1")
    );
}

#[test]
fn rejects_invalid_url() {
    for url in ["not a url", "", "http://", "ws://cw.example.com"] {
        let request = ConfigRequest {
            url: Some(url.into()),
            ..enabled_request()
        };
        assert_eq!(
            normalize("shop1", &request),
            Err(ValidationError::InvalidUrl),
            "{url:?} should be rejected"
        );
    }
}

#[test]
fn rejects_missing_url() {
    let request = ConfigRequest {
        url: None,
        ..enabled_request()
    };
    assert_eq!(
        normalize("shop1", &request),
        Err(ValidationError::InvalidUrl)
    );
}

#[test]
fn rejects_missing_account_id() {
    for account_id in [None, Some(String::new())] {
        let request = ConfigRequest {
            account_id,
            ..enabled_request()
        };
        assert_eq!(
            normalize("shop1", &request),
            Err(ValidationError::MissingAccountId)
        );
    }
}

#[test]
fn rejects_missing_token() {
    for token in [None, Some(String::new())] {
        let request = ConfigRequest {
            token,
            ..enabled_request()
        };
        assert_eq!(
            normalize("shop1", &request),
            Err(ValidationError::MissingToken)
        );
    }
}

#[test]
fn rejects_unset_sign_flag() {
    let request = ConfigRequest {
        sign_msg: None,
        ..enabled_request()
    };
    assert_eq!(
        normalize("shop1", &request),
        Err(ValidationError::MissingSignFlag)
    );
}

#[test]
fn url_is_checked_before_other_fields() {
    let request = ConfigRequest {
        enabled: Some(true),
        url: Some("bad url".into()),
        ..ConfigRequest::default()
    };
    assert_eq!(
        normalize("shop1", &request),
        Err(ValidationError::InvalidUrl)
    );
}

#[test]
fn unsigned_messages_drop_delimiter() {
    let request = ConfigRequest {
        sign_msg: Some(false),
        sign_delimiter: Some("\n--\n".into()),
        ..enabled_request()
    };
    let config = normalize("shop1", &request).unwrap();
    assert!(!config.sign_msg);
    assert_eq!(config.sign_delimiter, None);
}

#[test]
fn inbox_name_follows_instance() {
    let request = ConfigRequest {
        name_inbox: Some("spoofed".into()),
        ..enabled_request()
    };
    assert_eq!(normalize("shop 2", &request).unwrap().name_inbox, "shop 2");
}

#[test]
fn url_without_tld_or_scheme() {
    assert!(is_valid_url("http://localhost:3000"));
    assert!(is_valid_url("http://chatwoot"));
    assert!(is_valid_url("chatwoot:3000"));
    assert!(is_valid_url("10.0.0.4"));
    assert!(is_valid_url("cw.example.com/app"));
    assert!(is_valid_url("ftp://files.example.com"));
}

#[test]
fn url_rejections() {
    assert!(!is_valid_url(""));
    assert!(!is_valid_url(" https://cw.example.com"));
    assert!(!is_valid_url("https://cw example.com"));
    assert!(!is_valid_url("ws://cw.example.com"));
    assert!(!is_valid_url("https://"));
}
