//! PubChem client for resolving compound names to chemical identifiers
//!
//! This module wraps the PUG REST name lookup used to attach a PubChem CID
//! to each toxicity report.

pub mod client;

// Re-export public types
pub use client::PubChemClient;
