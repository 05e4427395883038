//! Data types exchanged with callers of the aggregation service.

use serde::{Deserialize, Serialize};

use crate::error::{MedToxError, Result};

/// Default number of articles returned when the caller does not ask for a
/// specific cap.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// One toxicity lookup request: a (drug, disease) pair and a result cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToxicityQuery {
    pub drug: String,
    pub disease: String,
    pub max_results: usize,
}

impl ToxicityQuery {
    /// Build a query with the default result cap.
    pub fn new(drug: impl Into<String>, disease: impl Into<String>) -> Self {
        Self {
            drug: drug.into(),
            disease: disease.into(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Override the result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Reject malformed input before any outbound call is made.
    pub fn validate(&self) -> Result<()> {
        if self.drug.trim().is_empty() {
            return Err(MedToxError::InvalidQuery(
                "drug must not be empty".to_string(),
            ));
        }
        if self.disease.trim().is_empty() {
            return Err(MedToxError::InvalidQuery(
                "disease must not be empty".to_string(),
            ));
        }
        if self.max_results == 0 {
            return Err(MedToxError::InvalidQuery(
                "retmax must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Lightweight per-article metadata from the PubMed ESummary API.
///
/// Field order within a response follows the ordering the upstream service
/// declares in its `uids` array, which is its relevance ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub pmid: String,
    pub title: Option<String>,
    pub journal: Option<String>,
    pub pubdate: Option<String>,
}

/// The combined result for one (drug, disease) query.
///
/// Never persisted and never mutated after construction; each report lives
/// only as long as the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToxicityReport {
    pub drug: String,
    pub disease: String,
    /// PubChem compound identifier; `None` when the drug name had no match.
    pub pubchem_cid: Option<u64>,
    /// The exact search term submitted to PubMed.
    pub pubmed_term: String,
    pub results: Vec<ArticleSummary>,
}
