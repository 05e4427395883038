use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::HttpExecutor;

/// PUG REST answers the name lookup quickly; 20 seconds is generous.
const PUBCHEM_TIMEOUT: Duration = Duration::from_secs(20);

/// Client for the PubChem PUG REST compound name lookup.
///
/// PubChem sits in a different quota regime than the E-utilities, so no
/// rate limiter is applied here.
#[derive(Clone)]
pub struct PubChemClient {
    executor: HttpExecutor,
    base_url: String,
}

impl PubChemClient {
    /// Create a client from a configuration.
    pub fn with_config(config: &ClientConfig) -> Self {
        Self {
            executor: HttpExecutor::new(config),
            base_url: config.effective_pubchem_base_url().to_string(),
        }
    }

    pub(crate) fn with_executor(executor: HttpExecutor, config: &ClientConfig) -> Self {
        Self {
            executor,
            base_url: config.effective_pubchem_base_url().to_string(),
        }
    }

    /// Resolve a drug name to its first PubChem CID.
    ///
    /// Returns `Ok(None)` when the name has no match. A structurally valid
    /// HTTP response whose body lacks the expected identifier fields is also
    /// treated as "no match" rather than an error; unknown drug names come
    /// back from PubChem in several shapes and the lookup tolerates all of
    /// them. Transport failures and exhausted retries still surface as
    /// errors.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use medtox::{ClientConfig, PubChemClient};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubChemClient::with_config(&ClientConfig::new());
    ///     if let Some(cid) = client.fetch_cid("Aspirin").await? {
    ///         println!("CID: {cid}");
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(drug = %drug))]
    pub async fn fetch_cid(&self, drug: &str) -> Result<Option<u64>> {
        let url = format!(
            "{}/compound/name/{}/cids/JSON",
            self.base_url,
            urlencoding::encode(drug)
        );

        debug!("Making PubChem CID lookup request");
        let body: Value = self
            .executor
            .get_json(&url, PUBCHEM_TIMEOUT, None, "PubChem CID lookup")
            .await?;

        let cid = extract_cid(&body);
        debug!(cid = ?cid, "PubChem lookup completed");
        Ok(cid)
    }
}

/// Pull the first CID out of an `IdentifierList` response body.
///
/// Missing or differently-shaped fields mean "no match"; PubChem reports
/// unknown names with a `Fault` object rather than an empty list.
fn extract_cid(body: &Value) -> Option<u64> {
    body.get("IdentifierList")
        .and_then(|list| list.get("CID"))
        .and_then(|cids| cids.as_array())
        .and_then(|cids| cids.first())
        .and_then(|cid| cid.as_u64())
}
