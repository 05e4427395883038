//! # MedTox
//!
//! Drug-toxicity literature aggregation over the PubChem and PubMed APIs.
//! For a (drug, disease) pair the crate resolves the drug's PubChem CID,
//! searches PubMed for toxicity literature, fetches the matching article
//! summaries, and combines everything into one report.
//!
//! ## Features
//!
//! - **Two upstream clients**: PubChem PUG REST for chemical identity,
//!   NCBI E-utilities (ESearch/ESummary) for literature
//! - **Rate limiting**: minimum inter-call spacing for the PubMed quota
//! - **Bounded retries**: exponential backoff shared by both clients
//! - **HTTP endpoint**: an axum router serving the combined report
//!
//! ## Quick Start
//!
//! ```no_run
//! use medtox::{ClientConfig, MedToxClient, ToxicityQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MedToxClient::with_config(&ClientConfig::from_env());
//!
//!     let query = ToxicityQuery::new("Aspirin", "Peptic ulcer disease").with_max_results(5);
//!     let report = client.toxicity_report(&query).await?;
//!
//!     println!("PubChem CID: {:?}", report.pubchem_cid);
//!     for article in &report.results {
//!         println!("{}: {:?}", article.pmid, article.title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Serving the query endpoint
//!
//! ```no_run
//! use medtox::{server::create_router, ClientConfig, MedToxClient};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MedToxClient::with_config(&ClientConfig::from_env());
//!     let app = create_router(client);
//!
//!     let listener = TcpListener::bind("0.0.0.0:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod models;
pub mod pubchem;
pub mod pubmed;
pub mod rate_limit;
pub mod retry;
pub mod server;

mod transport;

// Re-export main types for convenience
pub use aggregate::MedToxClient;
pub use config::ClientConfig;
pub use error::{MedToxError, Result};
pub use models::{ArticleSummary, ToxicityQuery, ToxicityReport};
pub use pubchem::PubChemClient;
pub use pubmed::{toxicity_term, PubMedClient};
pub use rate_limit::{RateLimiter, Service};
pub use retry::{RetryConfig, RetryableError};
