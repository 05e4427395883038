//! Search term construction for toxicity queries.

/// Build the PubMed search term for a (drug, disease) pair.
///
/// The template restricts both names to title/abstract matches and requires
/// the toxicity subheading. Output is deterministic; the drug and disease
/// are inserted as typed, since PubMed's query language needs no escaping
/// for plain compound and disease names. Percent-encoding happens once, at
/// the HTTP layer; callers must not pre-encode.
///
/// # Example
///
/// ```
/// use medtox::toxicity_term;
///
/// let term = toxicity_term("Aspirin", "Diabetes");
/// assert_eq!(
///     term,
///     "(Aspirin[Title/Abstract]) AND toxicity[Subheading] AND (Diabetes[Title/Abstract])"
/// );
/// ```
pub fn toxicity_term(drug: &str, disease: &str) -> String {
    format!("({drug}[Title/Abstract]) AND toxicity[Subheading] AND ({disease}[Title/Abstract])")
}
