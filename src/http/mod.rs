//! HTTP client module
//!
//! Provides the HTTP transport every stream goes through.
//!
//! # Features
//!
//! - **Automatic Retries**: 429, 5xx, timeouts and connect errors are retried
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Authentication**: Bearer token applied to every attempt

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
