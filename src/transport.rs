//! HTTP transport shared by the PubChem and PubMed clients.
//!
//! One GET + JSON-decode path with bounded retries. The rate limiter is
//! acquired inside the retried closure so every attempt, not just the first,
//! respects the upstream spacing.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{MedToxError, Result};
use crate::rate_limit::{RateLimiter, Service};
use crate::retry::{with_retry, RetryConfig};

#[derive(Clone)]
pub(crate) struct HttpExecutor {
    client: Client,
    retry_config: RetryConfig,
}

impl HttpExecutor {
    pub(crate) fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            retry_config: config.retry_config.clone(),
        }
    }

    /// GET `url` and decode the body as JSON.
    ///
    /// Non-2xx statuses, network errors and decode failures are retried up
    /// to the configured attempt budget; the last failure is returned once
    /// the budget is exhausted. A failed status carries the leading fragment
    /// of the response body for diagnostics.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        timeout: Duration,
        limiter: Option<(&RateLimiter, Service)>,
        operation_name: &str,
    ) -> Result<T> {
        with_retry(
            || async move {
                if let Some((limiter, service)) = limiter {
                    limiter.acquire(service).await;
                }

                debug!(operation = operation_name, url, "Making API request");
                let response = self
                    .client
                    .get(url)
                    .timeout(timeout)
                    .send()
                    .await
                    .map_err(MedToxError::from)?;

                let status = response.status();
                let body = response.text().await.map_err(MedToxError::from)?;

                if !status.is_success() {
                    return Err(MedToxError::api_error(status.as_u16(), &body));
                }

                let value = serde_json::from_str(&body)?;
                Ok(value)
            },
            &self.retry_config,
            operation_name,
        )
        .await
    }
}
