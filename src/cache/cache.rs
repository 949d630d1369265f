use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;

use crate::config::MAX_CACHE_CAPACITY;
use crate::knowledge::KnowledgeBase;
use crate::types::CacheTier;

/// Response cache keyed by normalized query text.
///
/// Two tiers:
/// - warm: one entry per keyword phrase, seeded at construction, read-only
/// - recent: bounded LRU of resolved queries, shared behind a mutex
///
/// Warm entries are never evicted. A capacity of zero disables the recent tier;
/// capacities above [`MAX_CACHE_CAPACITY`] are clamped.
#[derive(Debug)]
pub struct ResponseCache {
    warm: HashMap<String, String>,
    recent: Mutex<Option<LruCache<String, String>>>,
}

impl ResponseCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            warm: HashMap::new(),
            recent: Mutex::new(
                NonZeroUsize::new(capacity.min(MAX_CACHE_CAPACITY)).map(LruCache::new),
            ),
        }
    }

    /// Cache seeded with every keyword phrase mapped to its entry's answer.
    pub fn warmed(knowledge: &KnowledgeBase, capacity: usize) -> Self {
        let mut cache = Self::new(capacity);
        for entry in knowledge.entries() {
            for keyword in entry.keywords() {
                cache
                    .warm
                    .insert(keyword.text().to_string(), entry.answer().to_string());
            }
        }
        cache
    }

    pub fn get(&self, key: &str) -> Option<(String, CacheTier)> {
        if let Some(hit) = self.warm.get(key) {
            return Some((hit.clone(), CacheTier::Warm));
        }

        let mut recent = self.lock_recent();
        let hit = recent.as_mut()?.get(key)?.clone();
        Some((hit, CacheTier::Recent))
    }

    /// Store a resolved response. Keys owned by the warm tier are left alone.
    pub fn insert(&self, key: String, response: String) {
        if self.warm.contains_key(&key) {
            return;
        }
        if let Some(lru) = self.lock_recent().as_mut() {
            lru.put(key, response);
        }
    }

    pub fn warm_len(&self) -> usize {
        self.warm.len()
    }

    pub fn recent_len(&self) -> usize {
        self.lock_recent().as_ref().map_or(0, LruCache::len)
    }

    pub fn capacity(&self) -> usize {
        self.lock_recent()
            .as_ref()
            .map_or(0, |lru| lru.cap().get())
    }

    /// Drop every resolved entry. Warm entries survive.
    pub fn clear_recent(&self) {
        if let Some(lru) = self.lock_recent().as_mut() {
            lru.clear();
        }
    }

    // Entries are whole strings, so a panic elsewhere cannot leave one half-written.
    fn lock_recent(&self) -> MutexGuard<'_, Option<LruCache<String, String>>> {
        self.recent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
