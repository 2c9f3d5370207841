//! Tests for the auth module

use super::*;

#[test]
fn test_no_auth() {
    let auth = Authenticator::new(AuthConfig::None);
    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert!(built.headers().get("Authorization").is_none());
}

#[test]
fn test_bearer_auth() {
    let auth = Authenticator::bearer("my-token");
    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer my-token"
    );
}

#[test]
fn test_bearer_does_not_touch_query() {
    let auth = Authenticator::bearer("my-token");
    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api?continuation=ABC"));

    let built = req.build().unwrap();
    assert_eq!(built.url().query(), Some("continuation=ABC"));
}

#[test]
fn test_auth_config_default() {
    let config = AuthConfig::default();
    assert!(matches!(config, AuthConfig::None));
    assert_eq!(Authenticator::default().config(), &AuthConfig::None);
}

#[test]
fn test_debug_redacts_token() {
    let config = AuthConfig::bearer("secret-value");
    let debug = format!("{config:?}");
    assert!(!debug.contains("secret-value"));
    assert_eq!(debug, r#"Bearer { token: "<redacted>" }"#);
}
