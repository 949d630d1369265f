//! Fuzzy-matching FAQ resolution engine.
//!
//! `faq-core` maps a free-text question to the single best answer from a
//! fixed set of categorized entries: text normalization, weighted
//! edit-distance scoring, an inclusive confidence threshold, a two-tier
//! fallback and a response cache keyed by normalized text. Identical
//! normalized inputs always produce identical responses.

pub mod cache;
pub mod config;
pub mod dispatch;
pub mod knowledge;
pub mod matching;
pub mod observe;
pub mod types;

pub use config::EngineConfig;
pub use knowledge::KnowledgeBase;
pub use matching::{normalize, FaqEngine};
