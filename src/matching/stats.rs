use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::types::{CacheTier, Outcome};

/// Lock-free counters over every resolution an engine performed.
#[derive(Debug, Default)]
pub struct EngineStats {
    warm_hits: AtomicU64,
    recent_hits: AtomicU64,
    matched: AtomicU64,
    fallbacks: AtomicU64,
    defaults: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub warm_hits: u64,
    pub recent_hits: u64,
    pub matched: u64,
    pub fallbacks: u64,
    pub defaults: u64,
}

impl StatsSnapshot {
    pub fn cache_hits(&self) -> u64 {
        self.warm_hits + self.recent_hits
    }

    /// Resolutions that went through scoring.
    pub fn cache_misses(&self) -> u64 {
        self.matched + self.fallbacks + self.defaults
    }

    pub fn total(&self) -> u64 {
        self.cache_hits() + self.cache_misses()
    }
}

impl EngineStats {
    pub(crate) fn record(&self, outcome: &Outcome) {
        let counter = match outcome {
            Outcome::Cached { tier: CacheTier::Warm } => &self.warm_hits,
            Outcome::Cached { tier: CacheTier::Recent } => &self.recent_hits,
            Outcome::Matched { .. } => &self.matched,
            Outcome::Fallback { .. } => &self.fallbacks,
            Outcome::Default => &self.defaults,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            warm_hits: self.warm_hits.load(Ordering::Relaxed),
            recent_hits: self.recent_hits.load(Ordering::Relaxed),
            matched: self.matched.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            defaults: self.defaults.load(Ordering::Relaxed),
        }
    }
}
