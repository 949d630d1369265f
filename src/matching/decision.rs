use std::cmp::Ordering;

use crate::knowledge::Entry;
use crate::types::ScoreDetails;

/// An entry paired with its score for one query. Discarded after resolution.
#[derive(Debug, Clone)]
pub struct ScoredEntry<'a> {
    pub entry: &'a Entry,
    pub details: ScoreDetails,
}

impl ScoredEntry<'_> {
    pub fn score(&self) -> f64 {
        self.details.score
    }
}

/// Ranking: higher score first, then lexically lower category.
fn rank(a: &ScoredEntry<'_>, b: &ScoredEntry<'_>) -> Ordering {
    a.score()
        .partial_cmp(&b.score())
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.entry.category().cmp(a.entry.category()))
}

/// Winner among entries whose score reaches `threshold` (inclusive).
pub fn select_match<'s, 'a>(scored: &'s [ScoredEntry<'a>], threshold: f64) -> Option<&'s ScoredEntry<'a>> {
    scored
        .iter()
        .filter(|s| s.score() >= threshold)
        .max_by(|a, b| rank(a, b))
}

/// Best entry that declares a fallback and scored above zero.
///
/// The match threshold is not reapplied here; a weak but non-zero signal
/// still earns that category's clarifying prompt.
pub fn select_fallback<'s, 'a>(scored: &'s [ScoredEntry<'a>]) -> Option<(&'s ScoredEntry<'a>, &'a str)> {
    scored
        .iter()
        .filter(|s| s.score() > 0.0)
        .filter_map(|s| s.entry.fallback().map(|text| (s, text)))
        .max_by(|a, b| rank(a.0, b.0))
}
