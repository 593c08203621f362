mod api;
mod request;

use std::sync::RwLock;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::time::sleep;

use log::{debug, warn};
use minbar_domain::shared::DomainError;

use crate::config::TimeoutConfig;

/// HTTP retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (default: 3)
    pub max_retries: u32,
    /// Initial backoff duration in milliseconds (default: 500ms)
    pub initial_backoff_ms: u64,
    /// Maximum backoff duration in milliseconds (default: 5000ms)
    pub max_backoff_ms: u64,
    /// Backoff multiplier (default: 2.0 for exponential backoff)
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 500,
            max_backoff_ms: 5000,
            backoff_multiplier: 2.0,
        }
    }
}

/// `ApiGateway` implementation over the back-office REST server.
///
/// One instance per configured server. The bearer token is swappable at
/// runtime because login happens through the same gateway that later
/// carries the token.
pub struct RestApiGateway {
    pub(super) client: Client,
    pub(super) base_url: String,
    pub(super) auth_token: RwLock<Option<String>>,
    pub(super) retry_config: RetryConfig,
}

impl RestApiGateway {
    /// `api_base_url` is the normalized server URL including the `/api`
    /// prefix (see `Session::api_base_url`).
    pub fn new(api_base_url: &str, timeouts: &TimeoutConfig) -> Result<Self> {
        Self::with_retry_config(api_base_url, timeouts, RetryConfig::default())
    }

    pub fn with_retry_config(
        api_base_url: &str,
        timeouts: &TimeoutConfig,
        retry_config: RetryConfig,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeouts.request)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: api_base_url.trim_end_matches('/').to_string(),
            auth_token: RwLock::new(None),
            retry_config,
        })
    }

    pub(super) fn current_token(&self) -> Option<String> {
        self.auth_token
            .read()
            .expect("auth token lock poisoned")
            .clone()
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Execute a request with retry logic.
    ///
    /// Retries on network errors, timeouts and 5xx/429 responses. Client
    /// errors (401, 404, validation) are final. Only used for idempotent
    /// reads; mutations go out exactly once.
    pub(super) async fn execute_with_retry<F, Fut, T>(
        &self,
        operation_name: &str,
        mut request_fn: F,
    ) -> Result<T, DomainError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, DomainError>>,
    {
        let mut attempt = 0;
        let mut backoff_ms = self.retry_config.initial_backoff_ms;

        loop {
            attempt += 1;

            match request_fn().await {
                Ok(response) => {
                    if attempt > 1 {
                        debug!("{} succeeded after {} attempts", operation_name, attempt);
                    }
                    return Ok(response);
                }
                Err(e) => {
                    let should_retry = attempt <= self.retry_config.max_retries
                        && e.is_recoverable();

                    if should_retry {
                        warn!(
                            "{} failed (attempt {}/{}): {}. Retrying in {}ms...",
                            operation_name, attempt, self.retry_config.max_retries, e, backoff_ms
                        );

                        sleep(Duration::from_millis(backoff_ms)).await;

                        // Exponential backoff with cap
                        backoff_ms = ((backoff_ms as f64 * self.retry_config.backoff_multiplier)
                            as u64)
                            .min(self.retry_config.max_backoff_ms);
                    } else {
                        if attempt > self.retry_config.max_retries {
                            warn!(
                                "{} failed after {} attempts",
                                operation_name, self.retry_config.max_retries
                            );
                        }
                        return Err(e);
                    }
                }
            }
        }
    }
}
