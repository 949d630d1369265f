use crate::knowledge::{Entry, Keyword};
use crate::types::{NormalizedQuery, ScoreDetails};

pub trait Scorer {
    fn score(&self, entry: &Entry, query: &NormalizedQuery) -> ScoreDetails;
}

/// Weighted edit-distance scorer.
///
/// Per keyword:
/// 1. gate: at least one part of the phrase must occur as a substring of the query,
///    otherwise the keyword contributes 0.0
/// 2. similarity of the whole phrase against the whole query,
///    `1 - levenshtein / max(len)`, unclamped
/// 3. contribution = similarity * weight
///
/// The entry score is the maximum contribution, never a sum.
#[derive(Debug, Default, Clone, Copy)]
pub struct EditDistanceScorer;

impl Scorer for EditDistanceScorer {
    fn score(&self, entry: &Entry, query: &NormalizedQuery) -> ScoreDetails {
        let mut best: Option<(f64, Option<(&Keyword, f64)>)> = None;
        let mut keywords_gated_in = 0;

        for keyword in entry.keywords() {
            let candidate = if passes_gate(keyword, query) {
                keywords_gated_in += 1;
                let similarity = similarity(keyword.text(), query.as_str());
                (similarity * keyword.weight(), Some((keyword, similarity)))
            } else {
                (0.0, None)
            };

            // First keyword wins on equal contribution
            if best.map_or(true, |(score, _)| candidate.0 > score) {
                best = Some(candidate);
            }
        }

        match best {
            Some((score, hit)) => ScoreDetails {
                score,
                best_keyword: hit.map(|(k, _)| k.text().to_string()),
                similarity: hit.map(|(_, s)| s),
                keywords_gated_in,
            },
            None => ScoreDetails::zero(),
        }
    }
}

/// OR semantics: any single part of a multi-word phrase opens the gate.
pub fn passes_gate(keyword: &Keyword, query: &NormalizedQuery) -> bool {
    keyword
        .parts()
        .iter()
        .any(|part| query.as_str().contains(part.as_str()))
}

/// `1 - levenshtein(a, b) / max(len(a), len(b))`, lengths in chars.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - (strsim::levenshtein(a, b) as f64 / longest as f64)
}
