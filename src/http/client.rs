//! HTTP client with retry and rate limiting
//!
//! Every attempt is classified as done, failed or retryable. Throttled
//! responses wait for `Retry-After`; 5xx, timeouts and connection errors
//! back off per [`BackoffType`].

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::Authenticator;
use crate::error::{Error, Result};
use crate::types::{BackoffType, UrlParams};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(300),
            max_retries: 4,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::Exponential,
            rate_limit: Some(RateLimiterConfig::default()),
            default_headers: HashMap::new(),
            user_agent: format!("{}/{}", crate::NAME, crate::VERSION),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: UrlParams,
}

impl RequestConfig {
    /// Create a request config carrying the given query parameters
    pub fn with_query(query: UrlParams) -> Self {
        Self { query }
    }
}

/// HTTP client with retry and rate limiting
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            authenticator: Authenticator::default(),
            rate_limiter,
        })
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, authenticator: Authenticator) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.authenticator = authenticator;
        Ok(client)
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Make a GET request with config
    pub async fn get_with_config(&self, url: &str, config: RequestConfig) -> Result<Response> {
        self.request(Method::GET, url, config).await
    }

    /// Make a GET request and parse the body as JSON
    pub async fn get_json_with_config(&self, url: &str, config: RequestConfig) -> Result<Value> {
        let response = self.get_with_config(url, config).await?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::decode(format!("Response body is not valid JSON: {e}")))
    }

    /// Send a request, retrying throttled, failed and timed-out attempts
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<Response> {
        let full_url = self.build_url(url);
        let max_retries = self.config.max_retries;
        let timeout = self.config.timeout;

        let mut last_error = None;
        for attempt in 0..=max_retries {
            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            let sent = self
                .prepare(method.clone(), &full_url, &config, timeout)
                .send()
                .await;

            match self.classify(sent, attempt < max_retries, attempt, timeout).await {
                Attempt::Done(response) => {
                    debug!("{method} {full_url} succeeded");
                    return Ok(response);
                }
                Attempt::Fail(error) => return Err(error),
                Attempt::Retry { delay, error } => {
                    warn!(
                        "{error} (attempt {}/{}), retrying in {delay:?}",
                        attempt + 1,
                        max_retries + 1
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or(Error::MaxRetriesExceeded { max_retries }))
    }

    fn prepare(
        &self,
        method: Method,
        url: &str,
        config: &RequestConfig,
        timeout: Duration,
    ) -> RequestBuilder {
        let mut req = self.client.request(method, url).timeout(timeout);
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }
        self.authenticator.apply(req)
    }

    /// Decide what to do with one attempt's outcome
    async fn classify(
        &self,
        sent: reqwest::Result<Response>,
        can_retry: bool,
        attempt: u32,
        timeout: Duration,
    ) -> Attempt {
        let backoff = || self.calculate_backoff(attempt);
        let response = match sent {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                let error = Error::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                };
                return if can_retry {
                    Attempt::Retry {
                        delay: backoff(),
                        error,
                    }
                } else {
                    Attempt::Fail(error)
                };
            }
            Err(e) if e.is_connect() && can_retry => {
                return Attempt::Retry {
                    delay: backoff(),
                    error: Error::Http(e),
                }
            }
            Err(e) => return Attempt::Fail(Error::Http(e)),
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = extract_retry_after(&response);
            let error = Error::RateLimited {
                retry_after_seconds: retry_after,
            };
            return if can_retry {
                Attempt::Retry {
                    delay: Duration::from_secs(retry_after),
                    error,
                }
            } else {
                Attempt::Fail(error)
            };
        }

        if is_retryable_status(status) && can_retry {
            return Attempt::Retry {
                delay: backoff(),
                error: Error::http_status(status.as_u16(), ""),
            };
        }

        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Attempt::Fail(Error::http_status(status.as_u16(), body));
        }

        Attempt::Done(response)
    }

    /// Build full URL from path. The base is joined textually; a malformed
    /// base only surfaces when the request is sent.
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config.initial_backoff * factor
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("authenticator", &self.authenticator)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Outcome of a single attempt
enum Attempt {
    Done(Response),
    Fail(Error),
    Retry { delay: Duration, error: Error },
}

/// Check if an HTTP status is retryable
fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status.as_u16(),
        429 | 500 | 502 | 503 | 504 | 520 | 521 | 522 | 523 | 524
    )
}

/// Extract retry-after header value
fn extract_retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(60)
}
