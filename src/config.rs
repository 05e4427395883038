//! Client configuration for the upstream PubChem and PubMed services.

use std::time::Duration;

use crate::rate_limit::{RateLimiter, PUBMED_MIN_INTERVAL};
use crate::retry::RetryConfig;

const DEFAULT_PUBCHEM_BASE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";
const DEFAULT_PUBMED_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Environment variable holding the optional NCBI API key.
pub const NCBI_API_KEY_ENV: &str = "NCBI_API_KEY";

/// Configuration for [`crate::MedToxClient`] and the underlying upstream
/// clients.
///
/// # Example
///
/// ```
/// use medtox::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_api_key("your_ncbi_key")
///     .with_min_interval(std::time::Duration::from_millis(350));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Optional NCBI API key, attached to every PubMed request.
    pub api_key: Option<String>,
    /// Override for the PubChem PUG REST base URL (used in tests).
    pub pubchem_base_url: Option<String>,
    /// Override for the NCBI E-utilities base URL (used in tests).
    pub pubmed_base_url: Option<String>,
    /// Minimum spacing between PubMed calls.
    pub min_interval: Duration,
    /// Backoff policy shared by all upstream calls.
    pub retry_config: RetryConfig,
}

impl ClientConfig {
    /// Create a configuration with defaults and no API key.
    pub fn new() -> Self {
        Self {
            api_key: None,
            pubchem_base_url: None,
            pubmed_base_url: None,
            min_interval: PUBMED_MIN_INTERVAL,
            retry_config: RetryConfig::default(),
        }
    }

    /// Create a configuration reading `NCBI_API_KEY` from the environment.
    ///
    /// The variable is read once, at construction; a missing key only lowers
    /// the caller's NCBI quota tier and is not an error.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(key) = std::env::var(NCBI_API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.api_key = Some(key);
            }
        }
        config
    }

    /// Set the NCBI API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the PubChem base URL.
    pub fn with_pubchem_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.pubchem_base_url = Some(base_url.into());
        self
    }

    /// Override the PubMed E-utilities base URL.
    pub fn with_pubmed_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.pubmed_base_url = Some(base_url.into());
        self
    }

    /// Override the minimum spacing between PubMed calls.
    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Override the retry policy.
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    /// The PubChem base URL in effect.
    pub fn effective_pubchem_base_url(&self) -> &str {
        self.pubchem_base_url
            .as_deref()
            .unwrap_or(DEFAULT_PUBCHEM_BASE_URL)
    }

    /// The PubMed base URL in effect.
    pub fn effective_pubmed_base_url(&self) -> &str {
        self.pubmed_base_url
            .as_deref()
            .unwrap_or(DEFAULT_PUBMED_BASE_URL)
    }

    /// User agent sent on every outbound request.
    pub fn effective_user_agent(&self) -> String {
        format!("medtox/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Extra query parameters for PubMed requests.
    pub(crate) fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(api_key) = &self.api_key {
            params.push(("api_key".to_string(), api_key.clone()));
        }
        params
    }

    /// Create the rate limiter for the configured spacing.
    pub(crate) fn create_rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.min_interval)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
