use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use faq_core::cache::ResponseCache;
use faq_core::knowledge::{CategoryId, KnowledgeBase};
use faq_core::observe::ResolveObserver;
use faq_core::types::{CacheTier, NormalizedQuery, Outcome, ScoreDetails};
use faq_core::{EngineConfig, FaqEngine};

#[derive(Default)]
struct RecordingObserver {
    hits: AtomicUsize,
    misses: AtomicUsize,
    scored: AtomicUsize,
    decisions: AtomicUsize,
}

impl ResolveObserver for RecordingObserver {
    fn cache_hit(&self, _query: &NormalizedQuery, _tier: CacheTier) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }

    fn cache_miss(&self, _query: &NormalizedQuery) {
        self.misses.fetch_add(1, Ordering::SeqCst);
    }

    fn entry_scored(&self, _query: &NormalizedQuery, _category: &CategoryId, _details: &ScoreDetails) {
        self.scored.fetch_add(1, Ordering::SeqCst);
    }

    fn decided(&self, _query: &NormalizedQuery, _outcome: &Outcome) {
        self.decisions.fetch_add(1, Ordering::SeqCst);
    }
}

fn engine_with(capacity: usize) -> (FaqEngine, Arc<RecordingObserver>) {
    let observer = Arc::new(RecordingObserver::default());
    let config = EngineConfig {
        cache_capacity: capacity,
        ..EngineConfig::v0()
    };
    let engine = FaqEngine::new(KnowledgeBase::builtin().unwrap(), config)
        .unwrap()
        .with_observer(observer.clone());
    (engine, observer)
}

#[test]
fn second_lookup_is_served_without_scoring() {
    let (engine, observer) = engine_with(16);
    let categories = engine.knowledge_base().len();

    let first = engine.resolve_detailed("How do I appeal my grade?");
    assert_eq!(observer.scored.load(Ordering::SeqCst), categories);
    assert_eq!(observer.decisions.load(Ordering::SeqCst), 1);

    let second = engine.resolve_detailed("how do i appeal my grade");
    assert_eq!(second.response, first.response);
    assert_eq!(second.outcome, Outcome::Cached { tier: CacheTier::Recent });
    assert_eq!(observer.scored.load(Ordering::SeqCst), categories, "cache hit must not rescore");
    assert_eq!(observer.hits.load(Ordering::SeqCst), 1);
    assert_eq!(observer.misses.load(Ordering::SeqCst), 1);
}

#[test]
fn fallback_responses_are_cached_too() {
    let (engine, observer) = engine_with(16);

    let first = engine.resolve("asdkjhasdkjh");
    let second = engine.resolve("ASDKJHASDKJH!");

    assert_eq!(first, second);
    assert_eq!(observer.misses.load(Ordering::SeqCst), 1);
    assert_eq!(engine.cache().recent_len(), 1);
}

#[test]
fn warm_tier_is_seeded_from_every_keyword() {
    let (engine, _) = engine_with(16);

    let keywords: usize = engine
        .knowledge_base()
        .entries()
        .iter()
        .map(|e| e.keywords().len())
        .sum();

    assert_eq!(engine.cache().warm_len(), keywords);
    assert_eq!(engine.cache().recent_len(), 0);
}

#[test]
fn recent_tier_is_bounded_by_capacity() {
    let (engine, observer) = engine_with(2);

    engine.resolve("first question");
    engine.resolve("second question");
    engine.resolve("third question");
    assert_eq!(engine.cache().recent_len(), 2);
    assert_eq!(engine.cache().capacity(), 2);

    // Least recently used entry was evicted and must be recomputed
    engine.resolve("first question");
    assert_eq!(observer.misses.load(Ordering::SeqCst), 4);

    engine.resolve("third question");
    assert_eq!(observer.hits.load(Ordering::SeqCst), 1);
}

#[test]
fn warm_entries_survive_eviction_pressure() {
    let (engine, _) = engine_with(1);

    for i in 0..50 {
        engine.resolve(&format!("unrelated question number {i}"));
    }

    let resolution = engine.resolve_detailed("plagiarism policy");
    assert_eq!(resolution.outcome, Outcome::Cached { tier: CacheTier::Warm });
    assert_eq!(engine.cache().recent_len(), 1);
}

#[test]
fn zero_capacity_disables_recent_tier_only() {
    let (engine, observer) = engine_with(0);

    let first = engine.resolve("How do I appeal my grade?");
    let second = engine.resolve("How do I appeal my grade?");
    assert_eq!(first, second);
    assert_eq!(observer.misses.load(Ordering::SeqCst), 2);
    assert_eq!(engine.cache().recent_len(), 0);
    assert_eq!(engine.cache().capacity(), 0);

    let warm = engine.resolve_detailed("appeal grade");
    assert_eq!(warm.outcome, Outcome::Cached { tier: CacheTier::Warm });
}

#[test]
fn insert_never_overrides_warm_entry() {
    let kb = KnowledgeBase::builtin().unwrap();
    let cache = ResponseCache::warmed(&kb, 8);

    cache.insert("appeal grade".to_string(), "overridden".to_string());

    let (response, tier) = cache.get("appeal grade").unwrap();
    assert_eq!(tier, CacheTier::Warm);
    assert_eq!(response, kb.get("examinations").unwrap().answer());
    assert_eq!(cache.recent_len(), 0);
}

#[test]
fn clear_recent_keeps_warm_entries() {
    let kb = KnowledgeBase::builtin().unwrap();
    let cache = ResponseCache::warmed(&kb, 8);

    cache.insert("some question".to_string(), "some answer".to_string());
    assert_eq!(
        cache.get("some question"),
        Some(("some answer".to_string(), CacheTier::Recent))
    );

    cache.clear_recent();
    assert_eq!(cache.get("some question"), None);
    assert!(cache.get("course full").is_some());
}

#[test]
fn stats_track_every_path() {
    let (engine, _) = engine_with(16);

    engine.resolve("appeal grade"); // warm
    engine.resolve("How do I appeal my grade?"); // matched
    engine.resolve("How do I appeal my grade?"); // recent
    engine.resolve("asdkjhasdkjh"); // default
    engine.resolve(&format!("exam {}", "z".repeat(395))); // fallback

    let stats = engine.stats();
    assert_eq!(stats.warm_hits, 1);
    assert_eq!(stats.recent_hits, 1);
    assert_eq!(stats.matched, 1);
    assert_eq!(stats.defaults, 1);
    assert_eq!(stats.fallbacks, 1);
    assert_eq!(stats.total(), 5);
}
