//! Hooks the resolver calls at fixed points of a lookup.
//!
//! Observers see what happened; they never change the response.

use tracing::{debug, trace};

use crate::types::{CacheTier, CategoryId, NormalizedQuery, Outcome, ScoreDetails};

pub trait ResolveObserver: Send + Sync {
    fn cache_hit(&self, _query: &NormalizedQuery, _tier: CacheTier) {}

    fn cache_miss(&self, _query: &NormalizedQuery) {}

    fn entry_scored(&self, _query: &NormalizedQuery, _category: &CategoryId, _details: &ScoreDetails) {}

    fn decided(&self, _query: &NormalizedQuery, _outcome: &Outcome) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ResolveObserver for NoopObserver {}

/// Emits structured `tracing` events. Per-entry scores go out at `trace`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ResolveObserver for TracingObserver {
    fn cache_hit(&self, query: &NormalizedQuery, tier: CacheTier) {
        debug!(query = query.as_str(), ?tier, "served from cache");
    }

    fn cache_miss(&self, query: &NormalizedQuery) {
        debug!(query = query.as_str(), "cache miss");
    }

    fn entry_scored(&self, query: &NormalizedQuery, category: &CategoryId, details: &ScoreDetails) {
        trace!(
            query = query.as_str(),
            category = category.as_str(),
            score = details.score,
            keyword = details.best_keyword.as_deref(),
            gated_in = details.keywords_gated_in,
            "entry scored"
        );
    }

    fn decided(&self, query: &NormalizedQuery, outcome: &Outcome) {
        match outcome {
            Outcome::Matched { category, details } => {
                debug!(query = query.as_str(), category = category.as_str(), score = details.score, "matched");
            }
            Outcome::Fallback { category, details } => {
                debug!(query = query.as_str(), category = category.as_str(), score = details.score, "no confident match, using category fallback");
            }
            Outcome::Default => {
                debug!(query = query.as_str(), "no candidate, using generic fallback");
            }
            Outcome::Cached { .. } => {}
        }
    }
}
