use serde::Serialize;

use crate::matching::normalize;
use crate::types::identifiers::CategoryId;

/// A query in canonical comparison form.
///
/// Normalization rules (see [`normalize`]):
/// - Lowercase
/// - Only `a-z`, `0-9` and spaces survive
/// - Runs of spaces collapse, ends are trimmed
///
/// The normalized text is both the scoring input and the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedQuery(String);

impl NormalizedQuery {
    pub fn new(raw: &str) -> Self {
        NormalizedQuery(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Explanation for why an entry received its score.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct ScoreDetails {
    pub score: f64,
    /// Keyword that produced `score`, if that contribution came from a
    /// gated-in keyword. A gated-out 0.0 can outrank a negative contribution,
    /// so this may be `None` while `keywords_gated_in > 0`.
    pub best_keyword: Option<String>,
    /// Unweighted similarity of `best_keyword` against the query.
    pub similarity: Option<f64>,
    pub keywords_gated_in: usize,
}

impl ScoreDetails {
    pub fn zero() -> Self {
        Self {
            score: 0.0,
            best_keyword: None,
            similarity: None,
            keywords_gated_in: 0,
        }
    }
}

/// Which cache tier served a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheTier {
    /// Seeded from keyword phrases at construction, never evicted.
    Warm,
    /// Filled by earlier resolutions, bounded and evictable.
    Recent,
}

/// How a response was produced.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Cached { tier: CacheTier },
    Matched { category: CategoryId, details: ScoreDetails },
    Fallback { category: CategoryId, details: ScoreDetails },
    Default,
}

/// The final result of resolving one query.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct Resolution {
    pub query: String,
    pub normalized: String,
    pub response: String,
    pub outcome: Outcome,
}
