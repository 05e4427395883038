//! Aggregation of the two upstream lookups into one toxicity report.

use tracing::{info, instrument};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::{ToxicityQuery, ToxicityReport};
use crate::pubchem::PubChemClient;
use crate::pubmed::{toxicity_term, PubMedClient};
use crate::transport::HttpExecutor;

/// Combined client producing toxicity reports from PubChem and PubMed.
///
/// Both upstream clients share one HTTP executor; the PubMed client
/// additionally owns the rate limiter. The client is cheap to clone and a
/// single instance is meant to serve all requests of a process, so the
/// limiter's last-call state spans concurrent requests.
#[derive(Clone)]
pub struct MedToxClient {
    pubchem: PubChemClient,
    pubmed: PubMedClient,
}

impl MedToxClient {
    /// Create a client with default configuration and no API key.
    pub fn new() -> Self {
        Self::with_config(&ClientConfig::new())
    }

    /// Create a client from a configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use medtox::{ClientConfig, MedToxClient};
    ///
    /// let client = MedToxClient::with_config(&ClientConfig::from_env());
    /// ```
    pub fn with_config(config: &ClientConfig) -> Self {
        let executor = HttpExecutor::new(config);
        let rate_limiter = config.create_rate_limiter();

        Self {
            pubchem: PubChemClient::with_executor(executor.clone(), config),
            pubmed: PubMedClient::with_executor(executor, rate_limiter, config),
        }
    }

    /// The underlying PubChem client.
    pub fn pubchem(&self) -> &PubChemClient {
        &self.pubchem
    }

    /// The underlying PubMed client.
    pub fn pubmed(&self) -> &PubMedClient {
        &self.pubmed
    }

    /// Produce the toxicity report for one (drug, disease) query.
    ///
    /// The CID resolution and the literature search are independent and run
    /// concurrently; the summary step depends on the search result and runs
    /// after it. A terminal failure on either path fails the whole report;
    /// no partial result is synthesized.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use medtox::{MedToxClient, ToxicityQuery};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = MedToxClient::new();
    ///     let query = ToxicityQuery::new("Aspirin", "Peptic ulcer disease").with_max_results(5);
    ///     let report = client.toxicity_report(&query).await?;
    ///     println!("CID: {:?}, articles: {}", report.pubchem_cid, report.results.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(drug = %query.drug, disease = %query.disease))]
    pub async fn toxicity_report(&self, query: &ToxicityQuery) -> Result<ToxicityReport> {
        query.validate()?;

        let term = toxicity_term(&query.drug, &query.disease);

        let (pubchem_cid, pmids) = tokio::try_join!(
            self.pubchem.fetch_cid(&query.drug),
            self.pubmed.search(&term, query.max_results),
        )?;

        let results = self.pubmed.summaries(&pmids).await?;

        info!(
            cid = ?pubchem_cid,
            articles = results.len(),
            "Toxicity report assembled"
        );

        Ok(ToxicityReport {
            drug: query.drug.clone(),
            disease: query.disease.clone(),
            pubchem_cid,
            pubmed_term: term,
            results,
        })
    }
}

impl Default for MedToxClient {
    fn default() -> Self {
        Self::new()
    }
}
