//! Near-duplicate detection for records being drafted
//!
//! Runs every time the draft settles, so it shingles the candidate once and
//! each corpus record once.

use crate::similarity::ShingleSet;
use crate::AnalysisConfig;
use risklens_domain::Risk;

/// An existing record that resembles the draft
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarRisk<'a> {
    /// The existing record
    pub risk: &'a Risk,

    /// Jaccard similarity against the draft
    pub similarity: f64,
}

/// Find up to three existing records whose text resembles the draft
///
/// Only records strictly above 0.3 similarity are returned, most similar
/// first. Records with equal similarity keep their corpus order. An empty
/// result is the common case, not an error.
pub fn find_similar<'a>(corpus: &'a [Risk], title: &str, description: &str) -> Vec<SimilarRisk<'a>> {
    find_similar_with(corpus, title, description, &AnalysisConfig::default())
}

/// [`find_similar`] with explicit thresholds
pub fn find_similar_with<'a>(
    corpus: &'a [Risk],
    title: &str,
    description: &str,
    config: &AnalysisConfig,
) -> Vec<SimilarRisk<'a>> {
    let k = config.similarity.shingle_size;
    let draft = ShingleSet::from_text(&format!("{} {}", title, description), k);
    if draft.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<SimilarRisk<'a>> = corpus
        .iter()
        .map(|risk| SimilarRisk {
            risk,
            similarity: draft.jaccard(&ShingleSet::from_text(&risk.text(), k)),
        })
        .filter(|m| m.similarity > config.duplicates.threshold)
        .collect();

    // sort_by is stable, so ties keep corpus order
    matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    matches.truncate(config.duplicates.limit);

    tracing::debug!(
        corpus = corpus.len(),
        matches = matches.len(),
        "near-duplicate scan complete"
    );

    matches
}
