pub mod normalize;
pub mod scoring;
pub mod decision;
pub mod stats;

use std::fmt;
use std::sync::Arc;

use crate::cache::ResponseCache;
use crate::config::{ConfigError, EngineConfig};
use crate::knowledge::{KnowledgeBase, KnowledgeBaseError};
use crate::observe::{ResolveObserver, TracingObserver};
use crate::types::{NormalizedQuery, Outcome, Resolution};
pub use normalize::normalize;
pub use scoring::{passes_gate, similarity, EditDistanceScorer, Scorer};
pub use decision::{select_fallback, select_match, ScoredEntry};
pub use stats::{EngineStats, StatsSnapshot};

/// Resolves free-text queries to a single FAQ response.
///
/// Lookup order: normalize, cache (warm then recent), score every entry,
/// threshold + tie-break, category fallback, generic fallback. The result is
/// stored under the normalized query before returning.
///
/// Resolution never fails. The engine is `Send + Sync` whenever the scorer is,
/// so one instance can serve concurrent callers.
pub struct FaqEngine<S = EditDistanceScorer> {
    knowledge: KnowledgeBase,
    config: EngineConfig,
    cache: ResponseCache,
    scorer: S,
    observer: Arc<dyn ResolveObserver>,
    stats: EngineStats,
}

impl FaqEngine<EditDistanceScorer> {
    pub fn new(knowledge: KnowledgeBase, config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_scorer(knowledge, config, EditDistanceScorer)
    }

    /// Engine over the built-in FAQ table with default configuration.
    pub fn builtin() -> Result<Self, KnowledgeBaseError> {
        Ok(Self::assemble(
            KnowledgeBase::builtin()?,
            EngineConfig::v0(),
            EditDistanceScorer,
        ))
    }
}

impl<S> FaqEngine<S>
where
    S: Scorer,
{
    /// Rejects configurations that fail [`EngineConfig::validate`].
    pub fn with_scorer(
        knowledge: KnowledgeBase,
        config: EngineConfig,
        scorer: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(knowledge, config, scorer))
    }

    fn assemble(knowledge: KnowledgeBase, config: EngineConfig, scorer: S) -> Self {
        let cache = ResponseCache::warmed(&knowledge, config.cache_capacity);
        Self {
            knowledge,
            config,
            cache,
            scorer,
            observer: Arc::new(TracingObserver),
            stats: EngineStats::default(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ResolveObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn resolve(&self, raw_query: &str) -> String {
        self.resolve_detailed(raw_query).response
    }

    pub fn resolve_detailed(&self, raw_query: &str) -> Resolution {
        let query = NormalizedQuery::new(raw_query);

        // 1. Cache
        if let Some((response, tier)) = self.cache.get(query.as_str()) {
            self.observer.cache_hit(&query, tier);
            let outcome = Outcome::Cached { tier };
            self.stats.record(&outcome);
            return Resolution {
                query: raw_query.to_string(),
                normalized: query.into_string(),
                response,
                outcome,
            };
        }
        self.observer.cache_miss(&query);

        // 2. Scoring
        let scored = self.score_all(&query);

        // 3. Decision: confident match, then category fallback, then generic
        let (response, outcome) =
            if let Some(best) = select_match(&scored, self.config.match_threshold) {
                (
                    best.entry.answer().to_string(),
                    Outcome::Matched {
                        category: best.entry.category().clone(),
                        details: best.details.clone(),
                    },
                )
            } else if let Some((best, text)) = select_fallback(&scored) {
                (
                    text.to_string(),
                    Outcome::Fallback {
                        category: best.entry.category().clone(),
                        details: best.details.clone(),
                    },
                )
            } else {
                (self.config.generic_fallback.clone(), Outcome::Default)
            };

        self.observer.decided(&query, &outcome);
        self.stats.record(&outcome);

        // Concurrent misses on the same key may both land here; last write wins.
        self.cache
            .insert(query.as_str().to_string(), response.clone());

        Resolution {
            query: raw_query.to_string(),
            normalized: query.into_string(),
            response,
            outcome,
        }
    }

    /// Score every entry against `query`, in knowledge-base order.
    pub fn score_all(&self, query: &NormalizedQuery) -> Vec<ScoredEntry<'_>> {
        self.knowledge
            .entries()
            .iter()
            .map(|entry| {
                let details = self.scorer.score(entry, query);
                self.observer.entry_scored(query, entry.category(), &details);
                ScoredEntry { entry, details }
            })
            .collect()
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

impl<S> fmt::Debug for FaqEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaqEngine")
            .field("knowledge_version", self.knowledge.version())
            .field("categories", &self.knowledge.len())
            .field("config", &self.config)
            .field("warm_entries", &self.cache.warm_len())
            .field("recent_entries", &self.cache.recent_len())
            .finish()
    }
}
