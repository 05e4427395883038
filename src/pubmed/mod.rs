//! PubMed client for toxicity literature search
//!
//! This module talks to the NCBI E-utilities APIs: ESearch for matching
//! PMIDs and ESummary for per-article metadata. Both operations go through
//! the shared rate limiter; NCBI enforces its quota across all E-utilities
//! endpoints together.

pub mod client;
pub mod responses;
pub mod term;

// Re-export public types
pub use client::PubMedClient;
pub use term::toxicity_term;
