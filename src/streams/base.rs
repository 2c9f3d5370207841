//! Shared REST configuration for Eventbrite streams

use crate::auth::Authenticator;
use crate::config::TapConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::UrlParams;

/// Query parameter carrying the continuation token
pub const CONTINUATION_PARAM: &str = "continuation";

/// Base query parameters: the continuation token, when there is one
pub fn base_url_params(token: Option<&str>) -> UrlParams {
    let mut params = UrlParams::new();
    if let Some(token) = token {
        params.insert(CONTINUATION_PARAM.to_string(), token.to_string());
    }
    params
}

/// HTTP settings derived from the tap configuration
pub fn http_config(config: &TapConfig) -> HttpClientConfig {
    let mut builder = HttpClientConfig::builder().base_url(&config.base_url);
    if let Some(agent) = &config.user_agent {
        builder = builder.user_agent(agent);
    }
    builder.build()
}

/// Build the bearer-authenticated client all streams share
pub fn build_client(config: &TapConfig, http: HttpClientConfig) -> Result<HttpClient> {
    HttpClient::with_auth(http, Authenticator::bearer(&config.token))
}
