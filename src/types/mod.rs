pub mod identifiers;
pub mod resolution;

pub use identifiers::{CategoryId, KnowledgeBaseVersion};
pub use resolution::{CacheTier, NormalizedQuery, Outcome, Resolution, ScoreDetails};
