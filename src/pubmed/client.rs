use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{MedToxError, Result};
use crate::models::ArticleSummary;
use crate::pubmed::responses::{ESearchResult, ESummaryResponse};
use crate::rate_limit::{RateLimiter, Service};
use crate::transport::HttpExecutor;

const ESEARCH_TIMEOUT: Duration = Duration::from_secs(30);
// Batched summaries can be slow for long PMID lists.
const ESUMMARY_TIMEOUT: Duration = Duration::from_secs(40);

/// Client for the PubMed E-utilities search and summary APIs.
#[derive(Clone)]
pub struct PubMedClient {
    executor: HttpExecutor,
    base_url: String,
    rate_limiter: RateLimiter,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a client from a configuration.
    pub fn with_config(config: &ClientConfig) -> Self {
        let executor = HttpExecutor::new(config);
        let rate_limiter = config.create_rate_limiter();
        Self::assemble(executor, rate_limiter, config)
    }

    pub(crate) fn with_executor(
        executor: HttpExecutor,
        rate_limiter: RateLimiter,
        config: &ClientConfig,
    ) -> Self {
        Self::assemble(executor, rate_limiter, config)
    }

    fn assemble(executor: HttpExecutor, rate_limiter: RateLimiter, config: &ClientConfig) -> Self {
        Self {
            executor,
            base_url: config.effective_pubmed_base_url().to_string(),
            rate_limiter,
            config: config.clone(),
        }
    }

    /// Search for PMIDs matching a term.
    ///
    /// Returns at most `retmax` identifiers in the relevance order supplied
    /// by the upstream index; the order is not redefined here.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use medtox::{ClientConfig, PubMedClient};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::with_config(&ClientConfig::new());
    ///     let term = medtox::toxicity_term("Aspirin", "Peptic ulcer disease");
    ///     let pmids = client.search(&term, 10).await?;
    ///     println!("Found {} articles", pmids.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(term = %term, retmax = retmax))]
    pub async fn search(&self, term: &str, retmax: usize) -> Result<Vec<String>> {
        let url = self.with_api_params(format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={}&retmode=json",
            self.base_url,
            urlencoding::encode(term),
            retmax
        ));

        debug!("Making ESearch API request");
        let search_result: ESearchResult = self
            .executor
            .get_json(
                &url,
                ESEARCH_TIMEOUT,
                Some((&self.rate_limiter, Service::PubMed)),
                "PubMed ESearch",
            )
            .await?;

        // NCBI sometimes returns 200 OK with an ERROR field in the payload.
        if let Some(error) = &search_result.esearchresult.error {
            return Err(MedToxError::ApiError {
                status: 200,
                message: format!("NCBI ESearch API error: {error}"),
            });
        }

        let total_count: usize = search_result
            .esearchresult
            .count
            .as_deref()
            .and_then(|c| c.parse().ok())
            .unwrap_or(0);

        let mut pmids = search_result.esearchresult.idlist;
        // The cap holds even if the upstream ignores retmax.
        pmids.truncate(retmax);
        info!(
            results_found = pmids.len(),
            total_count, "Search completed"
        );
        Ok(pmids)
    }

    /// Fetch article summaries for a list of PMIDs in one batched request.
    ///
    /// An empty input returns an empty list without touching the network;
    /// ESummary rejects requests with no `id` parameter. Output order
    /// follows the `uids` ordering declared by the response itself, which
    /// is not guaranteed to match the input order.
    #[instrument(skip(self), fields(pmids_count = pmids.len()))]
    pub async fn summaries(&self, pmids: &[String]) -> Result<Vec<ArticleSummary>> {
        if pmids.is_empty() {
            debug!("No PMIDs to summarize, skipping request");
            return Ok(Vec::new());
        }

        let url = self.with_api_params(format!(
            "{}/esummary.fcgi?db=pubmed&id={}&retmode=json",
            self.base_url,
            pmids.join(",")
        ));

        debug!("Making ESummary API request");
        let response: ESummaryResponse = self
            .executor
            .get_json(
                &url,
                ESUMMARY_TIMEOUT,
                Some((&self.rate_limiter, Service::PubMed)),
                "PubMed ESummary",
            )
            .await?;

        let summaries = parse_esummary_result(&response.result);
        info!(
            requested = pmids.len(),
            parsed = summaries.len(),
            "ESummary batch completed"
        );
        Ok(summaries)
    }

    /// Append the configured API parameters to a URL.
    fn with_api_params(&self, mut url: String) -> String {
        for (key, value) in self.config.build_api_params() {
            url.push('&');
            url.push_str(&key);
            url.push('=');
            url.push_str(&urlencoding::encode(&value));
        }
        url
    }
}

/// Map an ESummary `result` object into ordered article summaries.
///
/// The `uids` array is the ordering the upstream service declares; each
/// UID's document is looked up by key. Documents with missing fields (or
/// missing entirely, as happens for retracted records) still yield a
/// summary with the PMID and `None` metadata.
pub(crate) fn parse_esummary_result(result: &Value) -> Vec<ArticleSummary> {
    let uids: Vec<String> = result
        .get("uids")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default();

    let mut summaries = Vec::with_capacity(uids.len());

    for uid in uids {
        let doc = result.get(&uid);
        let field = |name: &str| -> Option<String> {
            doc.and_then(|d| d.get(name))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };

        summaries.push(ArticleSummary {
            pmid: uid,
            title: field("title"),
            journal: field("fulljournalname"),
            pubdate: field("pubdate"),
        });
    }

    summaries
}
